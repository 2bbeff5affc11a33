// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Long-range time-series parsing (hashrate, price) and their poll sources.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::errors::{FetchError, SatscanError};
use crate::fetch::{require_array, require_i64, require_number, DataSource, MempoolClient};
use crate::types::{HashrateSample, PriceSample};

/// Time span of a history series request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySpan {
    /// Last month
    OneMonth,
    /// Last three months
    #[default]
    ThreeMonths,
    /// Last six months
    SixMonths,
    /// Last year
    OneYear,
    /// Full network history
    All,
}

impl HistorySpan {
    /// Path segment the upstream API expects.
    pub const fn as_path(self) -> &'static str {
        match self {
            HistorySpan::OneMonth => "1m",
            HistorySpan::ThreeMonths => "3m",
            HistorySpan::SixMonths => "6m",
            HistorySpan::OneYear => "1y",
            HistorySpan::All => "all",
        }
    }
}

impl std::fmt::Display for HistorySpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

fn epoch_seconds(
    payload: &Value,
    operation: &'static str,
    field: &'static str,
) -> Result<DateTime<Utc>, FetchError> {
    let secs = require_i64(payload, operation, field)?;
    Utc.timestamp_opt(secs, 0).single().ok_or_else(|| {
        FetchError::unexpected_shape(operation, format!("timestamp {secs} out of range"))
    })
}

/// Validate a hashrate history payload into an ordered sample series.
///
/// Upstream shape: `{"hashrates": [{"timestamp": ..., "avgHashrate": ...}]}`.
pub(crate) fn parse_hashrate_series(payload: &Value) -> Result<Vec<HashrateSample>, FetchError> {
    const OP: &str = "hashrate history";

    let entries = require_array(payload, OP, "hashrates")?;
    entries
        .iter()
        .map(|entry| {
            Ok(HashrateSample {
                timestamp: epoch_seconds(entry, OP, "timestamp")?,
                avg_hashrate: require_number(entry, OP, "avgHashrate")?,
            })
        })
        .collect()
}

/// Validate a historical price payload into an ordered sample series.
///
/// Upstream shape: `{"prices": [{"time": ..., "USD": ...}]}`.
pub(crate) fn parse_price_series(payload: &Value) -> Result<Vec<PriceSample>, FetchError> {
    const OP: &str = "price history";

    let entries = require_array(payload, OP, "prices")?;
    entries
        .iter()
        .map(|entry| {
            Ok(PriceSample {
                timestamp: epoch_seconds(entry, OP, "time")?,
                usd: require_number(entry, OP, "USD")?,
            })
        })
        .collect()
}

/// Poll source producing the hashrate history series for a fixed span.
#[derive(Debug, Clone)]
pub struct HashrateHistorySource {
    client: Arc<MempoolClient>,
    span: HistorySpan,
}

impl HashrateHistorySource {
    /// Create a source backed by the given client and span.
    pub fn new(client: Arc<MempoolClient>, span: HistorySpan) -> Self {
        Self { client, span }
    }

    /// The span this source requests.
    pub const fn span(&self) -> HistorySpan {
        self.span
    }
}

#[async_trait]
impl DataSource for HashrateHistorySource {
    type Output = Vec<HashrateSample>;

    async fn fetch(&self) -> Result<Vec<HashrateSample>, SatscanError> {
        Ok(self.client.fetch_hashrate_history(self.span).await?)
    }
}

/// Poll source producing the USD price history series.
#[derive(Debug, Clone)]
pub struct PriceHistorySource {
    client: Arc<MempoolClient>,
}

impl PriceHistorySource {
    /// Create a source backed by the given client.
    pub fn new(client: Arc<MempoolClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for PriceHistorySource {
    type Output = Vec<PriceSample>;

    async fn fetch(&self) -> Result<Vec<PriceSample>, SatscanError> {
        Ok(self.client.fetch_price_history().await?)
    }
}
