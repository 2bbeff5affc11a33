// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # satscan
//!
//! Data synchronization and fee computation for Bitcoin network dashboards:
//! a stale-while-revalidate cache with a retrying fetch wrapper, typed REST
//! fetchers, independent per-domain poll loops, a bounded sliding-window
//! fee history, and a pure wallet fee-adjustment engine.
//!
//! See [`Dashboard`] for the one-call wiring of the whole layer, or compose
//! the pieces ([`CacheStore`], [`MempoolClient`], [`Poller`]) directly.

pub mod adjust;
pub mod cache;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod history;
pub mod poll;
pub mod sync;
mod tracing;
pub mod types;

pub use adjust::{adjust, estimate_tx_cost};
pub use cache::{CacheEntry, CacheStore, CachedValue, FetchOptions, Freshness, FreshnessWindows, RetryPolicy};
pub use config::SyncConfig;
pub use errors::{CacheError, FeeAdjustError, FetchError, SatscanError};
pub use fetch::{
    ChainInfoSource, DataSource, FeeQuoteSource, HashrateHistorySource, HistorySpan,
    MempoolClient, MempoolStatsSource, PriceHistorySource,
};
pub use history::FeeHistory;
pub use poll::{PollHandle, PollSnapshot, Poller};
pub use sync::{CachedSource, Dashboard};
pub use types::{
    AdjustedFeeEstimate, ChainInfo, DifficultyAdjustment, FeeQuote, FeeTier, HashrateSample,
    MempoolStats, PriceSample, TierMultipliers, WalletProfile,
};
