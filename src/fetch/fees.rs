// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fee-quote parsing and its poll source.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{FetchError, SatscanError};
use crate::fetch::{require_number, DataSource, MempoolClient};
use crate::types::FeeQuote;

/// Validate a fee-quote payload into a typed [`FeeQuote`].
///
/// Two upstream shapes exist: the dashboard's own
/// `{fast, medium, slow}` and mempool.space's
/// `{fastestFee, halfHourFee, hourFee}`. The presence of `fastestFee`
/// selects the latter. Values may be JSON numbers or numeric strings.
pub(crate) fn parse_fee_quote(payload: &Value) -> Result<FeeQuote, FetchError> {
    const OP: &str = "fee quote";

    let (fast_key, medium_key, slow_key) = if payload.get("fastestFee").is_some() {
        ("fastestFee", "halfHourFee", "hourFee")
    } else {
        ("fast", "medium", "slow")
    };

    let fast = require_number(payload, OP, fast_key)?;
    let medium = require_number(payload, OP, medium_key)?;
    let slow = require_number(payload, OP, slow_key)?;

    Ok(FeeQuote::new(fast, medium, slow))
}

/// Poll source producing the current [`FeeQuote`].
#[derive(Debug, Clone)]
pub struct FeeQuoteSource {
    client: Arc<MempoolClient>,
}

impl FeeQuoteSource {
    /// Create a source backed by the given client.
    pub fn new(client: Arc<MempoolClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for FeeQuoteSource {
    type Output = FeeQuote;

    async fn fetch(&self) -> Result<FeeQuote, SatscanError> {
        Ok(self.client.fetch_fee_quote().await?)
    }
}
