// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Wiring for the full dashboard synchronization layer.
//!
//! This module connects the pieces: it wraps each domain's fetcher in the
//! shared cache store, spawns one poll loop per domain at its configured
//! cadence, and bridges the fee channel into the history accumulator.
//!
//! The cache store is an explicit object passed in by the caller; its
//! lifecycle is tied to application start/stop. Nothing here touches
//! ambient global state.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use satscan::{CacheStore, Dashboard, FreshnessWindows, MempoolClient, SyncConfig};
//!
//! let store = Arc::new(CacheStore::open(FreshnessWindows::DEFAULT, "cache.json").await?);
//! let client = Arc::new(MempoolClient::mainnet());
//! let dashboard = Dashboard::start(client, store, &SyncConfig::default());
//!
//! let mut fees = dashboard.fees.subscribe();
//! fees.changed().await?;
//! println!("quote: {:?}", fees.borrow().data);
//!
//! dashboard.shutdown().await;
//! ```

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStore, FetchOptions};
use crate::config::constants::keys;
use crate::config::SyncConfig;
use crate::errors::SatscanError;
use crate::fetch::{
    ChainInfoSource, DataSource, FeeQuoteSource, HashrateHistorySource, HistorySpan,
    MempoolClient, MempoolStatsSource, PriceHistorySource,
};
use crate::history::FeeHistory;
use crate::poll::{PollHandle, PollSnapshot, Poller};
use crate::types::{ChainInfo, FeeQuote, HashrateSample, MempoolStats, PriceSample};

/// A [`DataSource`] wrapped by the shared cache store.
///
/// Fetches go through [`CacheStore::fetch_with_cache`], so a fresh entry
/// short-circuits the network call and transient failures degrade to the
/// cached payload.
pub struct CachedSource<S> {
    inner: Arc<S>,
    store: Arc<CacheStore>,
    key: String,
    options: FetchOptions,
}

impl<S> CachedSource<S> {
    /// Wrap a source with the store under the given key.
    pub fn new(inner: S, store: Arc<CacheStore>, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(inner),
            store,
            key: key.into(),
            options: FetchOptions::default(),
        }
    }

    /// Override the fetch options (retry policy, force-fresh).
    #[must_use]
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// The cache key this source reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl<S> DataSource for CachedSource<S>
where
    S: DataSource + 'static,
    S::Output: Serialize + DeserializeOwned + Send + Sync,
{
    type Output = S::Output;

    async fn fetch(&self) -> Result<S::Output, SatscanError> {
        let inner = &self.inner;
        let value = self
            .store
            .fetch_with_cache(&self.key, || inner.fetch(), &self.options)
            .await?;
        Ok(value)
    }
}

/// Running poll loops for every dashboard data domain.
///
/// Each handle owns its own timer; domains are fully independent and a
/// failure in one never affects the others. Dropping the struct cancels
/// everything; prefer [`Dashboard::shutdown`] for a deterministic stop.
pub struct Dashboard {
    /// Fee-quote loop (fastest cadence)
    pub fees: PollHandle<FeeQuote>,
    /// Mempool statistics loop
    pub mempool: PollHandle<MempoolStats>,
    /// Chain tip / difficulty loop
    pub chain: PollHandle<ChainInfo>,
    /// Hashrate history loop (slowest cadence)
    pub hashrate: PollHandle<Vec<HashrateSample>>,
    /// USD price history loop (slowest cadence)
    pub price: PollHandle<Vec<PriceSample>>,
    /// Sliding-window fee history fed by the fee loop
    pub history: Arc<RwLock<FeeHistory>>,
    recorder: JoinHandle<()>,
}

impl Dashboard {
    /// Spawn all domain loops against one client and one store.
    #[must_use]
    pub fn start(client: Arc<MempoolClient>, store: Arc<CacheStore>, config: &SyncConfig) -> Self {
        let options = FetchOptions {
            force_fresh: false,
            retry: config.retry,
        };

        let fees = Poller::spawn(
            "fees",
            CachedSource::new(
                FeeQuoteSource::new(Arc::clone(&client)),
                Arc::clone(&store),
                keys::FEE_QUOTE,
            )
            .with_options(options),
            config.fee_interval,
        );

        let mempool = Poller::spawn(
            "mempool",
            CachedSource::new(
                MempoolStatsSource::new(Arc::clone(&client)),
                Arc::clone(&store),
                keys::MEMPOOL_STATS,
            )
            .with_options(options),
            config.mempool_interval,
        );

        let chain = Poller::spawn(
            "chain",
            CachedSource::new(
                ChainInfoSource::new(Arc::clone(&client)),
                Arc::clone(&store),
                keys::CHAIN_INFO,
            )
            .with_options(options),
            config.chain_interval,
        );

        let span = HistorySpan::default();
        let hashrate = Poller::spawn(
            "hashrate",
            CachedSource::new(
                HashrateHistorySource::new(Arc::clone(&client), span),
                Arc::clone(&store),
                format!("{}:{}", keys::HASHRATE_HISTORY, span.as_path()),
            )
            .with_options(options),
            config.history_interval,
        );

        let price = Poller::spawn(
            "price",
            CachedSource::new(
                PriceHistorySource::new(Arc::clone(&client)),
                Arc::clone(&store),
                keys::PRICE_HISTORY,
            )
            .with_options(options),
            config.history_interval,
        );

        let history = Arc::new(RwLock::new(FeeHistory::new(config.history_points)));
        let recorder = spawn_history_recorder(fees.subscribe(), Arc::clone(&history));

        Self {
            fees,
            mempool,
            chain,
            hashrate,
            price,
            history,
            recorder,
        }
    }

    /// Spawn with the default cadences and a fresh in-memory history.
    #[must_use]
    pub fn start_with_defaults(client: Arc<MempoolClient>, store: Arc<CacheStore>) -> Self {
        Self::start(client, store, &SyncConfig::default())
    }

    /// Stop every loop deterministically.
    pub async fn shutdown(self) {
        self.fees.shutdown().await;
        self.mempool.shutdown().await;
        self.chain.shutdown().await;
        self.hashrate.shutdown().await;
        self.price.shutdown().await;
        let _ = self.recorder.await;
    }
}

/// Bridge the fee poll channel into the history accumulator.
///
/// Every successful quote publication appends one sample; failed fetches
/// publish an error indicator and are skipped. The task exits when the fee
/// loop shuts down.
pub fn spawn_history_recorder(
    mut updates: tokio::sync::watch::Receiver<PollSnapshot<FeeQuote>>,
    history: Arc<RwLock<FeeHistory>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let (quote, at) = {
                let snapshot = updates.borrow_and_update();
                if snapshot.error.is_some() {
                    continue;
                }
                match (snapshot.data, snapshot.updated_at) {
                    (Some(quote), Some(at)) => (quote, at),
                    _ => continue,
                }
            };
            if let Ok(mut history) = history.write() {
                history.record(&quote, at);
                debug!(samples = history.len(), "Recorded fee history sample");
            }
        }
        debug!("Fee channel closed, history recorder exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FreshnessWindows;
    use crate::config::constants::HISTORY_POINTS;

    #[tokio::test]
    async fn test_cached_source_serves_fresh_entries_without_fetching() {
        use std::sync::atomic::{AtomicU32, Ordering};

        struct Counting(AtomicU32);

        #[async_trait]
        impl DataSource for Counting {
            type Output = u32;

            async fn fetch(&self) -> Result<u32, SatscanError> {
                Ok(self.0.fetch_add(1, Ordering::SeqCst) + 1)
            }
        }

        let store = Arc::new(CacheStore::new(FreshnessWindows::DEFAULT));
        let source = CachedSource::new(Counting(AtomicU32::new(0)), store, "test:counter");

        assert_eq!(source.fetch().await.unwrap(), 1);
        // Second fetch hits the fresh entry; the inner source is not called.
        assert_eq!(source.fetch().await.unwrap(), 1);
    }

    #[test]
    fn test_default_history_capacity_matches_constant() {
        let history = FeeHistory::new(SyncConfig::default().history_points);
        assert_eq!(history.capacity(), HISTORY_POINTS);
    }
}
