//! Typed domain values shared across the crate.

mod chain;
mod quote;
mod wallet;

pub use chain::{ChainInfo, DifficultyAdjustment, HashrateSample, MempoolStats, PriceSample};
pub use quote::{FeeQuote, FeeTier};
pub use wallet::{AdjustedFeeEstimate, TierMultipliers, WalletProfile};
