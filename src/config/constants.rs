//! Well-known constants and fixed configuration tables
//!
//! This module centralizes magic constants (poll cadences, freshness
//! windows, cache key prefixes) and the fixed wallet-profile table used
//! throughout the satscan crate, improving discoverability and
//! maintainability.

use std::time::Duration;

use crate::types::{TierMultipliers, WalletProfile};

/// Default base URL of the consumed REST API.
pub const DEFAULT_BASE_URL: &str = "https://mempool.space/";

/// Number of samples retained by the fee history accumulator.
pub const HISTORY_POINTS: usize = 60;

/// Decimal places kept on adjusted fee estimates.
pub const FEE_PRECISION: u32 = 2;

/// Divisor in the upstream transaction-cost formula
/// `ceil(size * rate / divisor)`.
///
/// Preserved exactly as the upstream source computes it; it is not a
/// correct sats-to-BTC conversion, and callers can override it via
/// [`estimate_tx_cost`](crate::adjust::estimate_tx_cost).
pub const DEFAULT_COST_DIVISOR: f64 = 1000.0;

/// Poll cadences, one per data domain.
///
/// Fee quotes move fastest; mempool/chain statistics change on block
/// cadence; the long-range history series barely move.
pub mod intervals {
    use super::Duration;

    /// Fee-quote refresh cadence
    pub const FEE_QUOTE: Duration = Duration::from_secs(15);

    /// Mempool statistics refresh cadence
    pub const MEMPOOL_STATS: Duration = Duration::from_secs(2 * 60);

    /// Chain tip / difficulty refresh cadence
    pub const CHAIN_INFO: Duration = Duration::from_secs(2 * 60);

    /// Hashrate and price history refresh cadence
    pub const HISTORY_SERIES: Duration = Duration::from_secs(10 * 60);
}

/// Cache key namespaces, one prefix per data domain.
///
/// Domains never share keys, so the single shared store has no
/// cross-domain contention.
pub mod keys {
    /// Current fee quote
    pub const FEE_QUOTE: &str = "fees:quote";

    /// Mempool statistics
    pub const MEMPOOL_STATS: &str = "mempool:stats";

    /// Chain tip and difficulty epoch
    pub const CHAIN_INFO: &str = "chain:info";

    /// Hashrate history series (span appended, e.g. "history:hashrate:3m")
    pub const HASHRATE_HISTORY: &str = "history:hashrate";

    /// USD price history series
    pub const PRICE_HISTORY: &str = "history:price";
}

/// The fixed set of known wallet fee profiles.
///
/// Multipliers are static configuration observed from each wallet's fee
/// estimator behavior relative to the raw network estimate; they are never
/// mutated at runtime.
pub mod wallets {
    use super::{TierMultipliers, WalletProfile};

    /// Raw network estimate: the identity profile.
    pub const MEMPOOL: WalletProfile = WalletProfile {
        id: "mempool",
        display_name: "Mempool.space",
        description: "Raw network estimate with no wallet adjustment",
        multipliers: TierMultipliers::UNITY,
    };

    /// Electrum's ETA-based estimator.
    pub const ELECTRUM: WalletProfile = WalletProfile {
        id: "electrum",
        display_name: "Electrum",
        description: "ETA estimator: pays up for next-block, discounts the slow tier",
        multipliers: TierMultipliers::new(1.1, 1.0, 0.9),
    };

    /// Phoenix pads every urgent tier for channel operations.
    pub const PHOENIX: WalletProfile = WalletProfile {
        id: "phoenix",
        display_name: "Phoenix",
        description: "Lightning wallet: pads fast and medium tiers for channel operations",
        multipliers: TierMultipliers::new(1.25, 1.1, 1.0),
    };

    /// Bull Bitcoin's exchange-wallet defaults.
    pub const BULL_BITCOIN: WalletProfile = WalletProfile {
        id: "bullbitcoin",
        display_name: "Bull Bitcoin",
        description: "Exchange wallet defaults with a safety margin on urgent tiers",
        multipliers: TierMultipliers::new(1.2, 1.05, 1.0),
    };

    /// All known profiles, in display order.
    pub static ALL: [WalletProfile; 4] = [MEMPOOL, ELECTRUM, PHOENIX, BULL_BITCOIN];

    /// Look up a profile by its stable id.
    pub fn by_id(id: &str) -> Option<&'static WalletProfile> {
        ALL.iter().find(|profile| profile.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_ids_are_unique() {
        for (i, a) in wallets::ALL.iter().enumerate() {
            for b in wallets::ALL.iter().skip(i + 1) {
                assert_ne!(a.id, b.id, "duplicate wallet id {}", a.id);
            }
        }
    }

    #[test]
    fn test_mempool_profile_is_identity() {
        assert_eq!(wallets::MEMPOOL.multipliers, TierMultipliers::UNITY);
    }

    #[test]
    fn test_by_id_round_trips_every_profile() {
        for profile in &wallets::ALL {
            let found = wallets::by_id(profile.id).expect("profile must be found by id");
            assert_eq!(found.display_name, profile.display_name);
        }
        assert!(wallets::by_id("unknown-wallet").is_none());
    }

    #[test]
    fn test_fee_quote_cadence_is_fastest() {
        assert!(intervals::FEE_QUOTE < intervals::MEMPOOL_STATS);
        assert!(intervals::MEMPOOL_STATS <= intervals::HISTORY_SERIES);
    }
}
