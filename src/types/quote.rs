// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for network fee quotes
//!
//! Separates the three confirmation-speed tiers for type safety and clarity.

use serde::{Deserialize, Serialize};

/// Confirmation-speed tier of a fee estimate.
///
/// Upstream sources express these as "fastest / half hour / hour"; the
/// dashboard model collapses them to fast / medium / slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    /// Next-block confirmation target
    Fast,
    /// Half-hour confirmation target
    Medium,
    /// One-hour confirmation target
    Slow,
}

impl FeeTier {
    /// All tiers, in display order.
    pub const ALL: [FeeTier; 3] = [FeeTier::Fast, FeeTier::Medium, FeeTier::Slow];

    /// Lowercase tier name.
    pub const fn as_str(self) -> &'static str {
        match self {
            FeeTier::Fast => "fast",
            FeeTier::Medium => "medium",
            FeeTier::Slow => "slow",
        }
    }
}

impl std::fmt::Display for FeeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base network fee-rate estimate in sats per virtual byte, one value per
/// confirmation-speed tier.
///
/// A quote is immutable once fetched and replaced wholesale on every poll;
/// downstream consumers never mutate individual tiers.
///
/// # Examples
///
/// ```
/// use satscan::{FeeQuote, FeeTier};
///
/// let quote = FeeQuote::new(12.0, 8.0, 3.0);
/// assert_eq!(quote.get(FeeTier::Medium), 8.0);
/// assert!(quote.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Fast-tier rate (sat/vB)
    pub fast: f64,
    /// Medium-tier rate (sat/vB)
    pub medium: f64,
    /// Slow-tier rate (sat/vB)
    pub slow: f64,
}

impl FeeQuote {
    /// Create a new fee quote from per-tier rates.
    pub const fn new(fast: f64, medium: f64, slow: f64) -> Self {
        Self { fast, medium, slow }
    }

    /// Get the rate for a specific tier.
    pub const fn get(&self, tier: FeeTier) -> f64 {
        match tier {
            FeeTier::Fast => self.fast,
            FeeTier::Medium => self.medium,
            FeeTier::Slow => self.slow,
        }
    }

    /// Check that every tier value is a finite number.
    pub fn is_finite(&self) -> bool {
        FeeTier::ALL.iter().all(|&t| self.get(t).is_finite())
    }
}

impl std::fmt::Display for FeeQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fast {:.1} / medium {:.1} / slow {:.1} sat/vB",
            self.fast, self.medium, self.slow
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_accessors() {
        let quote = FeeQuote::new(10.0, 5.0, 2.0);
        assert_eq!(quote.get(FeeTier::Fast), 10.0);
        assert_eq!(quote.get(FeeTier::Medium), 5.0);
        assert_eq!(quote.get(FeeTier::Slow), 2.0);
    }

    #[test]
    fn test_is_finite_rejects_nan_and_infinity() {
        assert!(FeeQuote::new(10.0, 5.0, 2.0).is_finite());
        assert!(!FeeQuote::new(f64::NAN, 5.0, 2.0).is_finite());
        assert!(!FeeQuote::new(10.0, f64::INFINITY, 2.0).is_finite());
        assert!(!FeeQuote::new(10.0, 5.0, f64::NEG_INFINITY).is_finite());
    }

    #[test]
    fn test_serialization_round_trip() {
        let quote = FeeQuote::new(12.5, 8.0, 3.25);
        let json = serde_json::to_string(&quote).unwrap();
        let back: FeeQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(quote, back);
    }

    #[test]
    fn test_tier_display_names() {
        assert_eq!(FeeTier::Fast.to_string(), "fast");
        assert_eq!(FeeTier::Medium.to_string(), "medium");
        assert_eq!(FeeTier::Slow.to_string(), "slow");
    }
}
