// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Stale-while-revalidate cache store with a retrying fetch wrapper.
//!
//! The store owns a single key/value map shared by all data domains; each
//! domain uses a disjoint key prefix (see
//! [`constants::keys`](crate::config::constants::keys)) so there is no
//! cross-domain contention. Within one key, writes are not synchronized —
//! the last completed fetch wins.
//!
//! When constructed with [`CacheStore::open`], entries are persisted as
//! `{data, timestamp}` JSON under a single file, loaded on open and written
//! back after mutations. Persistence is best-effort: a failed flush is
//! logged and the entry is kept in memory.
//!
//! # Fetch semantics
//!
//! [`CacheStore::fetch_with_cache`] implements the full degradation ladder:
//!
//! 1. fresh entry → served without a network call
//! 2. otherwise fetch; success overwrites the entry and returns
//! 3. failure with a non-expired entry → the cached payload is served and
//!    the error is swallowed (logged)
//! 4. failure with no usable entry → exponential backoff retries
//! 5. exhaustion → [`CacheError::RetriesExhausted`]
//!
//! Failures never write an entry.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Instrument};

use crate::cache::{Freshness, FreshnessWindows};
use crate::errors::{CacheError, SatscanError};
use crate::tracing::spans;

/// A stored cache entry: opaque JSON payload plus its write timestamp.
///
/// This is also the persisted wire shape (`{"data": ..., "timestamp": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload, stored as untyped JSON
    pub data: serde_json::Value,
    /// When the entry was written
    pub timestamp: DateTime<Utc>,
}

/// A typed cache hit with its derived freshness.
#[derive(Debug, Clone)]
pub struct CachedValue<T> {
    /// The deserialized payload
    pub value: T,
    /// Freshness class at read time
    pub freshness: Freshness,
    /// When the entry was written
    pub written_at: DateTime<Utc>,
}

/// Exponential backoff policy for `fetch_with_cache` retries.
///
/// `max_retries` counts retries *after* the initial attempt, so the total
/// number of fetch attempts is `1 + max_retries`. The delay before retry
/// `n` (zero-based) is `initial_delay * 2^n`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use satscan::RetryPolicy;
///
/// let policy = RetryPolicy::DEFAULT;
/// assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
/// assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Default policy: 3 retries starting at 1 second.
    pub const DEFAULT: Self = Self {
        max_retries: 3,
        initial_delay: Duration::from_millis(1000),
    };

    /// Backoff delay before the given zero-based retry.
    pub fn delay_for(&self, retry: u32) -> Duration {
        // Cap the exponent so pathological retry counts saturate instead of
        // overflowing the shift.
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(retry.min(20)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options controlling a single `fetch_with_cache` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Skip the fresh-entry shortcut and always attempt a fetch
    pub force_fresh: bool,
    /// Backoff policy when no usable cache entry exists
    pub retry: RetryPolicy,
}

/// On-disk form of the cache: a map of key to `{data, timestamp}` entries.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedCache {
    entries: HashMap<String, CacheEntry>,
}

impl PersistedCache {
    async fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            debug!(path = %path.display(), "Cache file does not exist, starting empty");
            return Ok(Self::default());
        }

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| CacheError::io(path, e))?;

        let cache: Self =
            serde_json::from_slice(&data).map_err(|source| CacheError::Serialization { source })?;

        info!(path = %path.display(), entries = cache.entries.len(), "Loaded persisted cache");
        Ok(cache)
    }

    async fn save(&self, path: &Path) -> Result<(), CacheError> {
        let data =
            serde_json::to_vec_pretty(self).map_err(|source| CacheError::Serialization { source })?;

        tokio::fs::write(path, data)
            .await
            .map_err(|e| CacheError::io(path, e))?;

        debug!(path = %path.display(), entries = self.entries.len(), "Saved persisted cache");
        Ok(())
    }
}

/// Stale-while-revalidate key/value cache.
///
/// The store is an explicit object owned by the application (typically
/// behind an `Arc` shared with the scheduling layer); its lifecycle is tied
/// to application start/stop rather than ambient global state.
///
/// # Thread Safety
///
/// All operations take `&self`; the inner map is guarded by a read-write
/// lock that is never held across an await point.
#[derive(Debug)]
pub struct CacheStore {
    windows: FreshnessWindows,
    entries: std::sync::RwLock<HashMap<String, CacheEntry>>,
    persist_path: Option<Box<Path>>,
}

impl CacheStore {
    /// Create an in-memory store with the given freshness windows.
    #[must_use]
    pub fn new(windows: FreshnessWindows) -> Self {
        Self {
            windows,
            entries: std::sync::RwLock::new(HashMap::new()),
            persist_path: None,
        }
    }

    /// Open a store persisted at `path`, loading any existing entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(
        windows: FreshnessWindows,
        path: impl AsRef<Path>,
    ) -> Result<Self, CacheError> {
        let path: Box<Path> = path.as_ref().into();
        let persisted = PersistedCache::load(&path).await?;
        Ok(Self {
            windows,
            entries: std::sync::RwLock::new(persisted.entries),
            persist_path: Some(path),
        })
    }

    /// The freshness windows this store classifies against.
    pub const fn windows(&self) -> FreshnessWindows {
        self.windows
    }

    /// Look up a key, returning the typed payload with its freshness class.
    ///
    /// Expired entries are still returned (flagged `Expired`) so callers can
    /// decide; `fetch_with_cache` never serves them. An entry whose payload
    /// no longer deserializes to `T` is treated as a miss and logged.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<CachedValue<T>> {
        let entry = self
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())?;

        let age = Utc::now()
            .signed_duration_since(entry.timestamp)
            .to_std()
            .unwrap_or_default();
        let freshness = self.windows.classify(age);

        match serde_json::from_value(entry.data) {
            Ok(value) => Some(CachedValue {
                value,
                freshness,
                written_at: entry.timestamp,
            }),
            Err(e) => {
                warn!(key, error = %e, "Cached payload no longer deserializes, treating as miss");
                None
            }
        }
    }

    /// Overwrite the entry for `key` with a now-timestamped payload.
    ///
    /// The in-memory write always takes effect; if the store is persisted, a
    /// failed flush is logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns an error only if the payload itself cannot be serialized.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let data =
            serde_json::to_value(value).map_err(|source| CacheError::Serialization { source })?;
        let entry = CacheEntry {
            data,
            timestamp: Utc::now(),
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), entry);
        }

        if self.persist_path.is_some() {
            if let Err(e) = self.flush().await {
                warn!(key, error = %e, "Cache flush failed, entry kept in memory only");
            }
        }
        Ok(())
    }

    /// Remove a single key. Returns true if an entry existed.
    ///
    /// Removal takes effect in memory immediately; the persisted file
    /// reflects it on the next flush.
    pub fn clear(&self, key: &str) -> bool {
        self.entries
            .write()
            .ok()
            .map(|mut entries| entries.remove(key).is_some())
            .unwrap_or(false)
    }

    /// Remove every key starting with `prefix`. Returns the number removed.
    pub fn clear_prefix(&self, prefix: &str) -> usize {
        if let Ok(mut entries) = self.entries.write() {
            let before = entries.len();
            entries.retain(|key, _| !key.starts_with(prefix));
            before - entries.len()
        } else {
            0
        }
    }

    /// Remove all entries.
    pub fn clear_all(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the current entries to the persisted file, if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub async fn flush(&self) -> Result<(), CacheError> {
        let Some(path) = self.persist_path.as_deref() else {
            return Ok(());
        };
        let snapshot = self
            .entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default();
        PersistedCache { entries: snapshot }.save(path).await
    }

    /// Fetch through the cache with stale fallback and bounded retries.
    ///
    /// See the module docs for the full degradation ladder. The `fetch`
    /// closure is invoked once per attempt; on success the entry for `key`
    /// is overwritten with the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::RetriesExhausted`] after `1 + max_retries`
    /// failed attempts with no non-expired entry to degrade to.
    pub async fn fetch_with_cache<T, F, Fut>(
        &self,
        key: &str,
        fetch: F,
        options: &FetchOptions,
    ) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, SatscanError>>,
    {
        let span = spans::fetch_with_cache(key);
        async {
            if !options.force_fresh {
                if let Some(hit) = self.get::<T>(key) {
                    if hit.freshness.is_fresh() {
                        debug!(key, "Serving fresh cache entry");
                        return Ok(hit.value);
                    }
                }
            }

            let mut retry = 0u32;
            loop {
                match fetch().await {
                    Ok(value) => {
                        if let Err(e) = self.set(key, &value).await {
                            warn!(key, error = %e, "Fetched payload could not be cached");
                        }
                        debug!(key, "Fetch succeeded, cache entry refreshed");
                        return Ok(value);
                    }
                    Err(err) => {
                        if let Some(hit) = self.get::<T>(key) {
                            if !hit.freshness.is_expired() {
                                warn!(
                                    key,
                                    error = %err,
                                    freshness = %hit.freshness,
                                    "Fetch failed, serving cached fallback"
                                );
                                return Ok(hit.value);
                            }
                        }
                        if retry >= options.retry.max_retries {
                            warn!(key, retries = retry, "Fetch retries exhausted with no usable cache entry");
                            return Err(CacheError::retries_exhausted(key, retry, err));
                        }
                        let delay = options.retry.delay_for(retry);
                        debug!(
                            key,
                            retry,
                            delay_ms = delay.as_millis() as u64,
                            "Fetch failed, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        retry += 1;
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delays_double_from_initial() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
    }

    #[test]
    fn test_retry_delay_saturates_on_large_retry_counts() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_secs(u64::MAX / 2),
        };
        // Must not panic; saturates at Duration::MAX.
        let delay = policy.delay_for(63);
        assert!(delay >= Duration::from_secs(u64::MAX / 2));
    }

    #[tokio::test]
    async fn test_set_then_get_returns_fresh_entry() {
        let store = CacheStore::new(FreshnessWindows::DEFAULT);
        store.set("fees:quote", &vec![1.0, 2.0, 3.0]).await.unwrap();

        let hit = store.get::<Vec<f64>>("fees:quote").expect("entry present");
        assert_eq!(hit.value, vec![1.0, 2.0, 3.0]);
        assert!(hit.freshness.is_fresh(), "just-written entry must be fresh");
    }

    #[tokio::test]
    async fn test_get_classifies_old_entries_as_stale() {
        let store = CacheStore::new(FreshnessWindows::DEFAULT);
        store.set("fees:quote", &1u32).await.unwrap();

        // Backdate the entry past the fresh window.
        {
            let mut entries = store.entries.write().unwrap();
            let entry = entries.get_mut("fees:quote").unwrap();
            entry.timestamp = Utc::now() - chrono::Duration::minutes(10);
        }

        let hit = store.get::<u32>("fees:quote").expect("entry present");
        assert!(hit.freshness.is_stale());
    }

    #[tokio::test]
    async fn test_get_with_wrong_type_is_a_miss() {
        let store = CacheStore::new(FreshnessWindows::DEFAULT);
        store.set("chain:info", &"not a number").await.unwrap();

        assert!(store.get::<u64>("chain:info").is_none());
    }

    #[tokio::test]
    async fn test_clear_prefix_only_touches_that_domain() {
        let store = CacheStore::new(FreshnessWindows::DEFAULT);
        store.set("fees:quote", &1u32).await.unwrap();
        store.set("fees:archive", &2u32).await.unwrap();
        store.set("mempool:stats", &3u32).await.unwrap();

        let removed = store.clear_prefix("fees:");
        assert_eq!(removed, 2);
        assert!(store.get::<u32>("fees:quote").is_none());
        assert!(store.get::<u32>("mempool:stats").is_some());
    }

    #[tokio::test]
    async fn test_clear_single_key() {
        let store = CacheStore::new(FreshnessWindows::DEFAULT);
        store.set("fees:quote", &1u32).await.unwrap();

        assert!(store.clear("fees:quote"));
        assert!(!store.clear("fees:quote"), "second clear finds nothing");
        assert!(store.is_empty());
    }
}
