// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the consumed mempool.space-style REST API.

use serde_json::Value;
use tracing::{debug, Instrument};
use url::Url;

use crate::config::constants::DEFAULT_BASE_URL;
use crate::errors::FetchError;
use crate::fetch::series::HistorySpan;
use crate::fetch::{chain, fees, series};
use crate::tracing::spans;
use crate::types::{
    ChainInfo, DifficultyAdjustment, FeeQuote, HashrateSample, MempoolStats, PriceSample,
};

/// Client for the upstream (or proxy) REST endpoints.
///
/// The client owns its connection pool and is cheap to clone-share behind
/// an `Arc`; one instance serves every data domain.
///
/// # Examples
///
/// ```rust,ignore
/// use satscan::MempoolClient;
///
/// let client = MempoolClient::mainnet();
/// let quote = client.fetch_fee_quote().await?;
/// println!("fast tier: {} sat/vB", quote.fast);
/// ```
#[derive(Debug, Clone)]
pub struct MempoolClient {
    base_url: Url,
    http: reqwest::Client,
}

impl MempoolClient {
    /// Create a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|_| FetchError::InvalidUrl {
            url: base_url.to_string(),
        })?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the public mainnet API.
    #[must_use]
    pub fn mainnet() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base URL is valid")
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, operation: &'static str, path: &str) -> Result<Url, FetchError> {
        self.base_url.join(path).map_err(|_| {
            FetchError::unexpected_shape(operation, format!("endpoint path '{path}' is invalid"))
        })
    }

    async fn get_body(&self, operation: &'static str, path: &str) -> Result<String, FetchError> {
        let url = self.endpoint(operation, path)?;
        let span = spans::fetch_endpoint(operation);
        async {
            let response = self
                .http
                .get(url.clone())
                .send()
                .await
                .map_err(|e| FetchError::http(operation, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::bad_status(operation, status.as_u16()));
            }

            let body = response
                .text()
                .await
                .map_err(|e| FetchError::http(operation, e))?;

            debug!(url = %url, bytes = body.len(), "Endpoint responded");
            Ok(body)
        }
        .instrument(span)
        .await
    }

    async fn get_json(&self, operation: &'static str, path: &str) -> Result<Value, FetchError> {
        let body = self.get_body(operation, path).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::decode(operation, e))
    }

    /// Fetch the current fee quote.
    ///
    /// Accepts both the dashboard shape (`{fast, medium, slow}`) and the
    /// upstream shape (`{fastestFee, halfHourFee, hourFee}`).
    pub async fn fetch_fee_quote(&self) -> Result<FeeQuote, FetchError> {
        let payload = self.get_json("fee quote", "api/v1/fees/recommended").await?;
        fees::parse_fee_quote(&payload)
    }

    /// Fetch aggregate mempool statistics.
    pub async fn fetch_mempool_stats(&self) -> Result<MempoolStats, FetchError> {
        let payload = self.get_json("mempool stats", "api/mempool").await?;
        chain::parse_mempool_stats(&payload)
    }

    /// Fetch the best chain tip height.
    ///
    /// This endpoint returns a bare integer body rather than a JSON object.
    pub async fn fetch_tip_height(&self) -> Result<u64, FetchError> {
        let body = self.get_body("tip height", "api/blocks/tip/height").await?;
        chain::parse_tip_height(&body)
    }

    /// Fetch the difficulty-adjustment state.
    pub async fn fetch_difficulty_adjustment(&self) -> Result<DifficultyAdjustment, FetchError> {
        let payload = self
            .get_json("difficulty adjustment", "api/v1/difficulty-adjustment")
            .await?;
        chain::parse_difficulty_adjustment(&payload)
    }

    /// Fetch the combined chain summary (tip height + difficulty epoch).
    ///
    /// Both endpoints are queried concurrently so the summary describes one
    /// observation instant.
    pub async fn fetch_chain_info(&self) -> Result<ChainInfo, FetchError> {
        let (tip_height, difficulty) = futures::future::try_join(
            self.fetch_tip_height(),
            self.fetch_difficulty_adjustment(),
        )
        .await?;
        Ok(ChainInfo {
            tip_height,
            difficulty,
        })
    }

    /// Fetch the network hashrate series for the given span.
    pub async fn fetch_hashrate_history(
        &self,
        span: HistorySpan,
    ) -> Result<Vec<HashrateSample>, FetchError> {
        let path = format!("api/v1/mining/hashrate/{}", span.as_path());
        let payload = self.get_json("hashrate history", &path).await?;
        series::parse_hashrate_series(&payload)
    }

    /// Fetch the historical USD price series.
    pub async fn fetch_price_history(&self) -> Result<Vec<PriceSample>, FetchError> {
        let payload = self
            .get_json("price history", "api/v1/historical-price")
            .await?;
        series::parse_price_series(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = MempoolClient::new("not a url");
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_mainnet_client_constructs() {
        let client = MempoolClient::mainnet();
        assert_eq!(client.base_url().host_str(), Some("mempool.space"));
    }

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let client = MempoolClient::new("https://proxy.example/btc/").unwrap();
        let url = client
            .endpoint("fee quote", "api/v1/fees/recommended")
            .unwrap();
        assert_eq!(url.as_str(), "https://proxy.example/btc/api/v1/fees/recommended");
    }
}
