// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Mempool and chain statistics parsing and their poll sources.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::errors::{FetchError, SatscanError};
use crate::fetch::{require_i64, require_number, require_u64, DataSource, MempoolClient};
use crate::types::{ChainInfo, DifficultyAdjustment, MempoolStats};

/// Validate a mempool statistics payload.
pub(crate) fn parse_mempool_stats(payload: &Value) -> Result<MempoolStats, FetchError> {
    const OP: &str = "mempool stats";
    Ok(MempoolStats {
        count: require_u64(payload, OP, "count")?,
        vsize: require_u64(payload, OP, "vsize")?,
        total_fee: require_number(payload, OP, "total_fee")?,
    })
}

/// Parse the bare-integer tip height body.
pub(crate) fn parse_tip_height(body: &str) -> Result<u64, FetchError> {
    body.trim()
        .parse::<u64>()
        .map_err(|_| FetchError::invalid_number("tip height", "height", body.trim()))
}

/// Validate a difficulty-adjustment payload.
///
/// `estimatedRetargetDate` arrives as epoch milliseconds.
pub(crate) fn parse_difficulty_adjustment(
    payload: &Value,
) -> Result<DifficultyAdjustment, FetchError> {
    const OP: &str = "difficulty adjustment";

    let retarget_ms = require_i64(payload, OP, "estimatedRetargetDate")?;
    let estimated_retarget_date = Utc
        .timestamp_millis_opt(retarget_ms)
        .single()
        .ok_or_else(|| {
            FetchError::unexpected_shape(OP, format!("retarget timestamp {retarget_ms} out of range"))
        })?;

    Ok(DifficultyAdjustment {
        difficulty: require_number(payload, OP, "difficulty")?,
        progress_percent: require_number(payload, OP, "progressPercent")?,
        estimated_retarget_date,
    })
}

/// Poll source producing aggregate [`MempoolStats`].
#[derive(Debug, Clone)]
pub struct MempoolStatsSource {
    client: Arc<MempoolClient>,
}

impl MempoolStatsSource {
    /// Create a source backed by the given client.
    pub fn new(client: Arc<MempoolClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for MempoolStatsSource {
    type Output = MempoolStats;

    async fn fetch(&self) -> Result<MempoolStats, SatscanError> {
        Ok(self.client.fetch_mempool_stats().await?)
    }
}

/// Poll source producing the combined [`ChainInfo`] summary.
#[derive(Debug, Clone)]
pub struct ChainInfoSource {
    client: Arc<MempoolClient>,
}

impl ChainInfoSource {
    /// Create a source backed by the given client.
    pub fn new(client: Arc<MempoolClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for ChainInfoSource {
    type Output = ChainInfo;

    async fn fetch(&self) -> Result<ChainInfo, SatscanError> {
        Ok(self.client.fetch_chain_info().await?)
    }
}
