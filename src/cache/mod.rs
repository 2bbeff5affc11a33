//! Stale-while-revalidate caching.
//!
//! This module provides the shared key/value cache used by every data
//! domain: freshness classification ([`Freshness`], [`FreshnessWindows`])
//! and the store itself ([`CacheStore`]) with its retrying fetch wrapper.

mod freshness;
mod store;

pub use freshness::{Freshness, FreshnessWindows};
pub use store::{CacheEntry, CacheStore, CachedValue, FetchOptions, RetryPolicy};
