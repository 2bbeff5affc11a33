// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-domain periodic poll loops.
//!
//! Each data domain owns an independent loop: an immediate first fetch,
//! then a fixed-interval ticker for as long as the handle lives. Ticks fire
//! independently — if a fetch is still pending when the next tick fires, no
//! mutual exclusion is applied and the last *completed* fetch wins on the
//! published state. Consumers must treat published state as eventually
//! consistent, not strictly ordered.
//!
//! A failed fetch records an error indicator on the snapshot without
//! clearing previously published data, and the loop keeps ticking; the next
//! tick retries from scratch.
//!
//! Shutdown is deterministic: [`PollHandle::shutdown`] stops the ticker and
//! no in-flight fetch, once resolved, may publish or schedule further work.
//! Dropping the handle has the same effect.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use satscan::{FeeQuoteSource, MempoolClient, Poller};
//! use satscan::config::constants::intervals;
//!
//! let client = Arc::new(MempoolClient::mainnet());
//! let handle = Poller::spawn(
//!     "fees",
//!     FeeQuoteSource::new(client),
//!     intervals::FEE_QUOTE,
//! );
//!
//! let mut updates = handle.subscribe();
//! while updates.changed().await.is_ok() {
//!     if let Some(quote) = updates.borrow().data {
//!         println!("latest quote: {quote}");
//!     }
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::fetch::DataSource;
use crate::tracing::spans;

/// Latest published state of one poll loop.
///
/// `data` holds the most recent successful payload and survives failures;
/// `error` holds the display form of the most recent failure and is cleared
/// by the next success.
#[derive(Debug, Clone)]
pub struct PollSnapshot<T> {
    /// Most recent successful payload, if any fetch has succeeded yet
    pub data: Option<T>,
    /// Most recent failure, if the latest completed fetch failed
    pub error: Option<String>,
    /// When `data` was last replaced
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of completed fetches (successes and failures)
    pub completed: u64,
}

impl<T> Default for PollSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            completed: 0,
        }
    }
}

impl<T> PollSnapshot<T> {
    /// True once at least one fetch has completed (either way).
    pub const fn has_completed(&self) -> bool {
        self.completed > 0
    }
}

/// Spawns per-domain poll loops.
pub struct Poller;

impl Poller {
    /// Spawn a poll loop for one domain.
    ///
    /// Fetches immediately, then on every `interval` tick until the
    /// returned handle is shut down or dropped. Each tick dispatches the
    /// fetch as an independent task, so a slow fetch from tick *k* may
    /// complete after tick *k+1*'s fetch has started; the last completed
    /// one wins.
    pub fn spawn<S>(domain: &'static str, source: S, interval: Duration) -> PollHandle<S::Output>
    where
        S: DataSource + 'static,
        S::Output: Send + Sync + 'static,
    {
        let source = Arc::new(source);
        let (state_tx, state_rx) = watch::channel(PollSnapshot::default());
        let state_tx = Arc::new(state_tx);
        let (stop_tx, stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(domain, interval_ms = interval.as_millis() as u64, "Poll loop started");

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick: u64 = 0;
            let mut stop = stop_rx.clone();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tick += 1;
                        let source = Arc::clone(&source);
                        let state_tx = Arc::clone(&state_tx);
                        let stop = stop_rx.clone();
                        tokio::spawn(async move {
                            let result = source.fetch().await;
                            // A fetch resolving after shutdown is dropped
                            // unpublished.
                            if *stop.borrow() {
                                return;
                            }
                            let span = spans::poll_publish(domain, tick);
                            let _guard = span.enter();
                            state_tx.send_modify(|snapshot| match result {
                                Ok(data) => {
                                    snapshot.data = Some(data);
                                    snapshot.error = None;
                                    snapshot.updated_at = Some(Utc::now());
                                    snapshot.completed += 1;
                                }
                                Err(e) => {
                                    warn!(domain, tick, error = %e, "Poll fetch failed");
                                    snapshot.error = Some(e.to_string());
                                    snapshot.completed += 1;
                                }
                            });
                        });
                    }
                    _ = stop.changed() => {
                        break;
                    }
                }
            }

            debug!(domain, ticks = tick, "Poll loop stopped");
        });

        PollHandle {
            domain,
            state_rx,
            stop_tx,
            task,
        }
    }
}

/// Handle to a running poll loop.
///
/// Dropping the handle cancels the loop; in-flight fetches resolve but are
/// never published.
pub struct PollHandle<T> {
    domain: &'static str,
    state_rx: watch::Receiver<PollSnapshot<T>>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl<T> PollHandle<T> {
    /// The domain label this loop was spawned with.
    pub const fn domain(&self) -> &'static str {
        self.domain
    }

    /// Subscribe to published snapshots.
    ///
    /// Every completed fetch (success or failure) notifies subscribers.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.state_rx.clone()
    }

    /// Clone of the latest published snapshot.
    pub fn latest(&self) -> PollSnapshot<T>
    where
        T: Clone,
    {
        self.state_rx.borrow().clone()
    }

    /// Stop the loop deterministically.
    ///
    /// After this returns, the ticker task has exited and no further
    /// snapshots will ever be published.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
        info!(domain = self.domain, "Poll loop shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::errors::{FetchError, SatscanError};

    struct CountingSource {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl DataSource for CountingSource {
        type Output = u32;

        async fn fetch(&self) -> Result<u32, SatscanError> {
            Ok(self.calls.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    struct AlwaysFailing;

    #[async_trait]
    impl DataSource for AlwaysFailing {
        type Output = u32;

        async fn fetch(&self) -> Result<u32, SatscanError> {
            Err(SatscanError::Fetch(FetchError::bad_status("test", 502)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_is_immediate() {
        let calls = Arc::new(AtomicU32::new(0));
        let handle = Poller::spawn(
            "test",
            CountingSource {
                calls: Arc::clone(&calls),
            },
            Duration::from_secs(60),
        );

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().data, Some(1), "first tick fires without waiting an interval");

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_publishes_error_without_data() {
        let failing = Poller::spawn("failing", AlwaysFailing, Duration::from_secs(60));
        let mut rx = failing.subscribe();
        rx.changed().await.unwrap();
        {
            let snapshot = rx.borrow();
            assert!(snapshot.data.is_none());
            assert!(snapshot.error.is_some(), "failure must set the error indicator");
        }
        failing.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_publication() {
        let calls = Arc::new(AtomicU32::new(0));
        let handle = Poller::spawn(
            "test",
            CountingSource {
                calls: Arc::clone(&calls),
            },
            Duration::from_millis(100),
        );
        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        handle.shutdown().await;

        let completed = rx.borrow().completed;
        // Give any stray task time to (incorrectly) publish.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(
            rx.borrow().completed,
            completed,
            "no snapshot may be published after shutdown"
        );
    }
}
