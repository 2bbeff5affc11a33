// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Wallet profiles and adjusted fee estimates.
//!
//! A wallet profile is a named, static multiplier set simulating how a
//! specific wallet inflates or discounts base fee quotes. The set of known
//! profiles is fixed configuration; see
//! [`constants::wallets`](crate::config::constants::wallets).

use serde::Serialize;

use crate::types::FeeTier;

/// Per-tier fee multipliers for a wallet profile.
///
/// # Examples
///
/// ```
/// use satscan::{FeeTier, TierMultipliers};
///
/// let multipliers = TierMultipliers::new(1.1, 1.0, 0.9);
/// assert_eq!(multipliers.get(FeeTier::Slow), 0.9);
/// assert_eq!(TierMultipliers::UNITY.get(FeeTier::Fast), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierMultipliers {
    /// Fast-tier multiplier
    pub fast: f64,
    /// Medium-tier multiplier
    pub medium: f64,
    /// Slow-tier multiplier
    pub slow: f64,
}

impl TierMultipliers {
    /// Identity multipliers: the adjusted estimate equals the base quote.
    pub const UNITY: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a new multiplier set.
    pub const fn new(fast: f64, medium: f64, slow: f64) -> Self {
        Self { fast, medium, slow }
    }

    /// Get the multiplier for a specific tier.
    pub const fn get(&self, tier: FeeTier) -> f64 {
        match tier {
            FeeTier::Fast => self.fast,
            FeeTier::Medium => self.medium,
            FeeTier::Slow => self.slow,
        }
    }
}

/// A named wallet fee profile: static, read-only configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalletProfile {
    /// Stable identifier (e.g. "electrum")
    pub id: &'static str,
    /// Human-readable wallet name
    pub display_name: &'static str,
    /// Short description of the wallet's fee behavior
    pub description: &'static str,
    /// Per-tier fee multipliers
    pub multipliers: TierMultipliers,
}

impl std::fmt::Display for WalletProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// A wallet-specific fee estimate derived from a base quote.
///
/// Each tier is `quote[tier] * multipliers[tier]`, rounded to a fixed
/// decimal precision. Recomputed on every quote update or wallet-selection
/// change; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedFeeEstimate {
    /// Adjusted fast-tier rate (sat/vB)
    pub fast: f64,
    /// Adjusted medium-tier rate (sat/vB)
    pub medium: f64,
    /// Adjusted slow-tier rate (sat/vB)
    pub slow: f64,
}

impl AdjustedFeeEstimate {
    /// Get the adjusted rate for a specific tier.
    pub const fn get(&self, tier: FeeTier) -> f64 {
        match tier {
            FeeTier::Fast => self.fast,
            FeeTier::Medium => self.medium,
            FeeTier::Slow => self.slow,
        }
    }
}
