//! Error types for the stale-while-revalidate cache store.

use std::path::PathBuf;

use crate::errors::SatscanError;

/// Errors that can occur in cache store operations.
///
/// Note that `fetch_with_cache` deliberately absorbs transient fetch
/// failures when a non-expired fallback entry exists; only terminal
/// conditions surface as a `CacheError`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Freshness windows were configured with `fresh_window >= stale_window`.
    ///
    /// The two windows must partition the age axis into fresh, stale, and
    /// expired regions; equal or inverted windows would leave the stale
    /// region empty or negative.
    #[error("Invalid freshness windows: fresh {fresh_secs}s must be shorter than stale {stale_secs}s")]
    InvalidWindows {
        /// Configured fresh window in seconds
        fresh_secs: u64,
        /// Configured stale window in seconds
        stale_secs: u64,
    },

    /// All fetch attempts failed and no usable cache entry existed.
    ///
    /// This is the terminal outcome of `fetch_with_cache`: the initial
    /// attempt plus `max_retries` retries all failed, and no entry younger
    /// than the stale window was available to degrade to.
    #[error("Fetch for '{key}' failed after {attempts} retries with no usable cache entry")]
    RetriesExhausted {
        /// The cache key being fetched
        key: String,
        /// Number of retries performed (excluding the initial attempt)
        attempts: u32,
        /// The error from the final fetch attempt
        #[source]
        source: Box<SatscanError>,
    },

    /// Reading or writing the persisted cache file failed.
    #[error("Cache file I/O failed for {path}")]
    Io {
        /// Path of the persisted cache file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The persisted cache file or a payload could not be (de)serialized.
    #[error("Cache serialization failed")]
    Serialization {
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Helper to create a `RetriesExhausted` error for a key.
    pub fn retries_exhausted(key: impl Into<String>, attempts: u32, source: SatscanError) -> Self {
        CacheError::RetriesExhausted {
            key: key.into(),
            attempts,
            source: Box::new(source),
        }
    }

    /// Helper to create an `Io` error for the persisted cache file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}
