// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded sliding-window fee history.
//!
//! The accumulator keeps four parallel sequences (timestamp plus one per
//! tier) bounded to a fixed capacity; once full, the oldest samples are
//! evicted first. Samples are appended in arrival order with no
//! deduplication — successive identical quotes still produce one sample
//! each, which charts render as a flat segment.
//!
//! The accumulator only produces chart-ready arrays; it is never consulted
//! for cache or retry decisions.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::types::{FeeQuote, FeeTier};

/// Bounded, ordered fee-quote history.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use satscan::{FeeHistory, FeeQuote, FeeTier};
///
/// let mut history = FeeHistory::new(60);
/// history.record(&FeeQuote::new(12.0, 8.0, 3.0), Utc::now());
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.tier_series(FeeTier::Fast), vec![12.0]);
/// ```
#[derive(Debug, Clone)]
pub struct FeeHistory {
    capacity: usize,
    timestamps: VecDeque<DateTime<Utc>>,
    fast: VecDeque<f64>,
    medium: VecDeque<f64>,
    slow: VecDeque<f64>,
}

impl FeeHistory {
    /// Create an empty history retaining at most `capacity` samples.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            timestamps: VecDeque::with_capacity(capacity),
            fast: VecDeque::with_capacity(capacity),
            medium: VecDeque::with_capacity(capacity),
            slow: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one sample, evicting the oldest if the bound is exceeded.
    pub fn record(&mut self, quote: &FeeQuote, at: DateTime<Utc>) {
        self.timestamps.push_back(at);
        self.fast.push_back(quote.fast);
        self.medium.push_back(quote.medium);
        self.slow.push_back(quote.slow);

        while self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
            self.fast.pop_front();
            self.medium.pop_front();
            self.slow.pop_front();
        }
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Maximum number of retained samples.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Chart-ready timestamp axis, oldest first.
    #[must_use]
    pub fn timestamp_series(&self) -> Vec<DateTime<Utc>> {
        self.timestamps.iter().copied().collect()
    }

    /// Chart-ready value series for one tier, oldest first.
    #[must_use]
    pub fn tier_series(&self, tier: FeeTier) -> Vec<f64> {
        let values = match tier {
            FeeTier::Fast => &self.fast,
            FeeTier::Medium => &self.medium,
            FeeTier::Slow => &self.slow,
        };
        values.iter().copied().collect()
    }

    /// The most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<(DateTime<Utc>, FeeQuote)> {
        let at = *self.timestamps.back()?;
        let quote = FeeQuote::new(
            *self.fast.back()?,
            *self.medium.back()?,
            *self.slow.back()?,
        );
        Some((at, quote))
    }
}
