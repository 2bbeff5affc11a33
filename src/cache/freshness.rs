// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Freshness classification for cached entries.
//!
//! An entry's age partitions into exactly one of three classes:
//!
//! - **fresh**: `age < fresh_window` — served without refetching
//! - **stale**: `fresh_window <= age < stale_window` — usable as a fallback
//!   when a refetch fails
//! - **expired**: `age >= stale_window` — discarded rather than used
//!
//! The windows are configuration, not stored state; freshness is always
//! derived at read time from the entry's write timestamp.

use std::time::Duration;

use crate::errors::CacheError;

/// Freshness class of a cached entry, derived from its age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than the fresh window; served without refetching
    Fresh,
    /// Between the fresh and stale windows; usable as a fallback
    Stale,
    /// At or beyond the stale window; unusable
    Expired,
}

impl Freshness {
    /// True if the entry is fresh.
    pub const fn is_fresh(self) -> bool {
        matches!(self, Freshness::Fresh)
    }

    /// True if the entry is stale (but not fresh and not expired).
    pub const fn is_stale(self) -> bool {
        matches!(self, Freshness::Stale)
    }

    /// True if the entry is expired.
    pub const fn is_expired(self) -> bool {
        matches!(self, Freshness::Expired)
    }

    /// Lowercase class name, for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Stale => "stale",
            Freshness::Expired => "expired",
        }
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Age thresholds classifying cached entries.
///
/// Invariant: `fresh_window < stale_window`, enforced at construction so the
/// three freshness classes always partition the age axis.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use satscan::FreshnessWindows;
///
/// let windows = FreshnessWindows::new(
///     Duration::from_secs(5 * 60),
///     Duration::from_secs(30 * 60),
/// ).unwrap();
///
/// assert!(windows.classify(Duration::from_secs(2 * 60)).is_fresh());
/// assert!(windows.classify(Duration::from_secs(10 * 60)).is_stale());
/// assert!(windows.classify(Duration::from_secs(45 * 60)).is_expired());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessWindows {
    fresh_window: Duration,
    stale_window: Duration,
}

impl FreshnessWindows {
    /// Default windows: 5 minutes fresh, 30 minutes stale.
    pub const DEFAULT: Self = Self {
        fresh_window: Duration::from_secs(5 * 60),
        stale_window: Duration::from_secs(30 * 60),
    };

    /// Create windows, validating `fresh_window < stale_window`.
    pub fn new(fresh_window: Duration, stale_window: Duration) -> Result<Self, CacheError> {
        if fresh_window >= stale_window {
            return Err(CacheError::InvalidWindows {
                fresh_secs: fresh_window.as_secs(),
                stale_secs: stale_window.as_secs(),
            });
        }
        Ok(Self {
            fresh_window,
            stale_window,
        })
    }

    /// Age threshold below which entries are fresh.
    pub const fn fresh_window(&self) -> Duration {
        self.fresh_window
    }

    /// Age threshold at or beyond which entries are expired.
    pub const fn stale_window(&self) -> Duration {
        self.stale_window
    }

    /// Classify an entry age into its freshness class.
    pub fn classify(&self, age: Duration) -> Freshness {
        if age < self.fresh_window {
            Freshness::Fresh
        } else if age < self.stale_window {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }
}

impl Default for FreshnessWindows {
    fn default() -> Self {
        Self::DEFAULT
    }
}
