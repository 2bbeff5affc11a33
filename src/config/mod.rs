//! Runtime configuration for the synchronization layer.

pub mod constants;

use std::time::Duration;

use crate::cache::{FreshnessWindows, RetryPolicy};

/// Configuration for the full dashboard synchronization layer.
///
/// Defaults mirror the cadences and windows in
/// [`constants`]; construct with `SyncConfig::default()` and override
/// fields as needed.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use satscan::SyncConfig;
///
/// let config = SyncConfig {
///     fee_interval: Duration::from_secs(30),
///     ..SyncConfig::default()
/// };
/// assert_eq!(config.history_points, 60);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Fee-quote poll cadence
    pub fee_interval: Duration,
    /// Mempool statistics poll cadence
    pub mempool_interval: Duration,
    /// Chain tip / difficulty poll cadence
    pub chain_interval: Duration,
    /// Hashrate and price history poll cadence
    pub history_interval: Duration,
    /// Freshness windows for the shared cache store
    pub windows: FreshnessWindows,
    /// Backoff policy for cache-wrapped fetches
    pub retry: RetryPolicy,
    /// Capacity of the fee history accumulator
    pub history_points: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fee_interval: constants::intervals::FEE_QUOTE,
            mempool_interval: constants::intervals::MEMPOOL_STATS,
            chain_interval: constants::intervals::CHAIN_INFO,
            history_interval: constants::intervals::HISTORY_SERIES,
            windows: FreshnessWindows::DEFAULT,
            retry: RetryPolicy::DEFAULT,
            history_points: constants::HISTORY_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = SyncConfig::default();
        assert_eq!(config.fee_interval, constants::intervals::FEE_QUOTE);
        assert_eq!(config.history_points, constants::HISTORY_POINTS);
        assert_eq!(config.retry, RetryPolicy::DEFAULT);
    }
}
