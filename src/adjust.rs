// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Wallet-specific fee adjustment.
//!
//! Pure transforms from a base network fee quote to a wallet-specific
//! estimate. No hidden state: calling any function here twice with
//! identical inputs yields identical output.

use crate::config::constants::FEE_PRECISION;
use crate::errors::FeeAdjustError;
use crate::tracing::spans;
use crate::types::{AdjustedFeeEstimate, FeeQuote, FeeTier, WalletProfile};

/// Round to a fixed number of decimal places.
fn round_to_precision(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Adjust a base fee quote for a wallet profile.
///
/// For each tier, multiplies the quote's rate by the profile's multiplier
/// and fixes the result to [`FEE_PRECISION`] decimal places. Rejects
/// non-finite inputs and non-finite products; values are never silently
/// coerced to zero.
///
/// With the identity profile
/// ([`wallets::MEMPOOL`](crate::config::constants::wallets::MEMPOOL)) the
/// adjusted estimate equals the base quote.
///
/// # Examples
///
/// ```
/// use satscan::config::constants::wallets;
/// use satscan::{adjust, FeeQuote};
///
/// let quote = FeeQuote::new(10.0, 5.0, 2.0);
/// let estimate = adjust(&quote, &wallets::ELECTRUM).unwrap();
/// assert_eq!(estimate.fast, 11.0);
/// assert_eq!(estimate.medium, 5.0);
/// assert_eq!(estimate.slow, 1.8);
/// ```
///
/// # Errors
///
/// Returns an error if any tier's quote value, multiplier, or product is
/// not a finite number.
pub fn adjust(
    quote: &FeeQuote,
    profile: &WalletProfile,
) -> Result<AdjustedFeeEstimate, FeeAdjustError> {
    let span = spans::adjust_fee(profile.id);
    let _guard = span.enter();

    let mut adjusted = [0f64; 3];
    for (slot, tier) in adjusted.iter_mut().zip(FeeTier::ALL) {
        let rate = quote.get(tier);
        if !rate.is_finite() {
            return Err(FeeAdjustError::InvalidQuote { tier });
        }

        let multiplier = profile.multipliers.get(tier);
        if !multiplier.is_finite() {
            return Err(FeeAdjustError::InvalidMultiplier { tier });
        }

        let value = round_to_precision(rate * multiplier, FEE_PRECISION);
        if !value.is_finite() {
            return Err(FeeAdjustError::NonFiniteResult { tier });
        }
        *slot = value;
    }

    let [fast, medium, slow] = adjusted;
    Ok(AdjustedFeeEstimate { fast, medium, slow })
}

/// Estimate the cost of a transaction at a given fee rate.
///
/// Preserves the upstream formula `ceil(size * rate / divisor)` exactly as
/// the surveyed source computes it. Note that with the default divisor of
/// 1000 this is *not* a correct sats-to-BTC unit conversion; the divisor is
/// exposed so callers can document or override the behavior, but the
/// default is intentionally left as upstream ships it.
///
/// # Examples
///
/// ```
/// use satscan::config::constants::DEFAULT_COST_DIVISOR;
/// use satscan::estimate_tx_cost;
///
/// // 225 vB at 12 sat/vB
/// let cost = estimate_tx_cost(225.0, 12.0, DEFAULT_COST_DIVISOR).unwrap();
/// assert_eq!(cost, 3.0); // ceil(2700 / 1000)
/// ```
///
/// # Errors
///
/// Returns an error if any input is non-finite, negative, or the divisor
/// is not strictly positive.
pub fn estimate_tx_cost(
    size_vbytes: f64,
    rate_per_vbyte: f64,
    divisor: f64,
) -> Result<f64, FeeAdjustError> {
    if !size_vbytes.is_finite() || size_vbytes < 0.0 {
        return Err(FeeAdjustError::invalid_cost_input("size_vbytes", size_vbytes));
    }
    if !rate_per_vbyte.is_finite() || rate_per_vbyte < 0.0 {
        return Err(FeeAdjustError::invalid_cost_input(
            "rate_per_vbyte",
            rate_per_vbyte,
        ));
    }
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(FeeAdjustError::invalid_cost_input("divisor", divisor));
    }

    let cost = (size_vbytes * rate_per_vbyte / divisor).ceil();
    if !cost.is_finite() {
        return Err(FeeAdjustError::invalid_cost_input("result", cost));
    }
    Ok(cost)
}
