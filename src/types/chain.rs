// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed payloads for mempool, chain, and market statistics.
//!
//! Every type here is the validated, fully-typed form of an upstream JSON
//! payload; fetchers reject malformed responses before these are ever
//! constructed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate statistics for the current mempool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MempoolStats {
    /// Number of unconfirmed transactions
    pub count: u64,
    /// Total virtual size of the mempool in vbytes
    pub vsize: u64,
    /// Sum of all pending transaction fees in sats
    pub total_fee: f64,
}

/// State of the current difficulty epoch.
///
/// Field names follow the upstream difficulty-adjustment payload:
/// `progress_percent` is how far through the 2016-block epoch the chain is,
/// and `estimated_retarget_date` is the projected time of the next
/// adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAdjustment {
    /// Current network difficulty
    pub difficulty: f64,
    /// Progress through the current epoch, 0-100
    pub progress_percent: f64,
    /// Projected time of the next retarget
    pub estimated_retarget_date: DateTime<Utc>,
}

/// Combined chain summary: tip height plus difficulty epoch state.
///
/// Produced by one poll tick so both values describe the same observation
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Height of the best chain tip
    pub tip_height: u64,
    /// Difficulty epoch state
    pub difficulty: DifficultyAdjustment,
}

/// One sample of a network hashrate time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HashrateSample {
    /// Sample time
    pub timestamp: DateTime<Utc>,
    /// Average hashrate over the sample window, in H/s
    pub avg_hashrate: f64,
}

/// One sample of a historical USD price time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Sample time
    pub timestamp: DateTime<Utc>,
    /// USD price at the sample time
    pub usd: f64,
}
