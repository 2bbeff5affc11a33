//! Error types for fee adjustment.

use crate::types::FeeTier;

/// Errors that can occur when adjusting a base fee quote for a wallet.
///
/// The adjustment engine is pure and validates strictly: a non-finite input
/// or product is rejected synchronously, never silently coerced to zero.
#[derive(Debug, thiserror::Error)]
pub enum FeeAdjustError {
    /// The base quote value for a tier is not a finite number.
    #[error("Quote value for {tier} tier is not a finite number")]
    InvalidQuote {
        /// The tier whose value was rejected
        tier: FeeTier,
    },

    /// The wallet multiplier for a tier is not a finite number.
    ///
    /// Wallet profiles are static configuration, so this indicates a
    /// misconfigured profile rather than bad runtime data.
    #[error("Multiplier for {tier} tier is not a finite number")]
    InvalidMultiplier {
        /// The tier whose multiplier was rejected
        tier: FeeTier,
    },

    /// The product of quote and multiplier overflowed to a non-finite value.
    #[error("Adjusted value for {tier} tier is not finite")]
    NonFiniteResult {
        /// The tier whose adjusted value was rejected
        tier: FeeTier,
    },

    /// A transaction-cost input (size, rate, or divisor) was rejected.
    #[error("Invalid transaction cost input '{field}': {value}")]
    InvalidCostInput {
        /// Name of the rejected parameter
        field: &'static str,
        /// Display form of the rejected value
        value: String,
    },
}

impl FeeAdjustError {
    /// Helper to create an `InvalidCostInput` error from any displayable value.
    pub fn invalid_cost_input(field: &'static str, value: impl std::fmt::Display) -> Self {
        FeeAdjustError::InvalidCostInput {
            field,
            value: value.to_string(),
        }
    }
}
