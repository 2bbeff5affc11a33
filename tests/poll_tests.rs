// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the per-domain poll loops
//!
//! These assert eventual consistency of the published state, not strict
//! ordering: the loops intentionally allow overlapping fetches with
//! last-completed-write-wins semantics.

mod helpers;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use helpers::{CountingSource, SequenceSource, SlowSource};
use satscan::sync::spawn_history_recorder;
use satscan::{FeeHistory, FeeQuote, FeeTier, Poller};

#[tokio::test(start_paused = true)]
async fn test_first_fetch_fires_immediately_then_on_cadence() {
    let started = tokio::time::Instant::now();
    let handle = Poller::spawn("fees", CountingSource::new(), Duration::from_secs(15));
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().data, Some(1));
    assert_eq!(
        started.elapsed(),
        Duration::ZERO,
        "subscriber activation fetches immediately"
    );

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().data, Some(2));
    assert_eq!(
        started.elapsed(),
        Duration::from_secs(15),
        "subsequent fetches follow the configured interval"
    );

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().data, Some(3));
    assert_eq!(started.elapsed(), Duration::from_secs(30));

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_keeps_published_data_and_sets_error() {
    let source = SequenceSource::new(vec![Ok(10u32), Err(502), Ok(20u32)]);
    let handle = Poller::spawn("fees", source, Duration::from_secs(15));
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    {
        let snapshot = rx.borrow_and_update();
        assert_eq!(snapshot.data, Some(10));
        assert!(snapshot.error.is_none());
    }

    rx.changed().await.unwrap();
    {
        let snapshot = rx.borrow_and_update();
        assert_eq!(
            snapshot.data,
            Some(10),
            "a failed fetch must not clear previously published data"
        );
        assert!(snapshot.error.is_some(), "the error indicator is recorded");
    }

    rx.changed().await.unwrap();
    {
        let snapshot = rx.borrow_and_update();
        assert_eq!(snapshot.data, Some(20));
        assert!(snapshot.error.is_none(), "a success clears the indicator");
    }

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_in_flight_fetch_unpublished() {
    let handle = Poller::spawn(
        "slow",
        SlowSource {
            delay: Duration::from_secs(30),
            value: 99,
        },
        Duration::from_secs(15),
    );
    let rx = handle.subscribe();

    // The first tick's fetch is still sleeping when we shut down.
    handle.shutdown().await;

    // Give the in-flight fetch ample time to resolve.
    tokio::time::sleep(Duration::from_secs(120)).await;

    let snapshot = rx.borrow();
    assert_eq!(snapshot.completed, 0, "resolved-after-cancel fetches are dropped");
    assert!(snapshot.data.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_fetches_resolve_last_write_wins() {
    // Fetches take 40s against a 15s interval, so several ticks overlap;
    // whichever completes last determines the final state.
    let handle = Poller::spawn(
        "slow",
        SlowSource {
            delay: Duration::from_secs(40),
            value: 7,
        },
        Duration::from_secs(15),
    );
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    let first_completed = rx.borrow_and_update().completed;
    assert!(first_completed >= 1);

    // Let more overlapping fetches land; the published value stays
    // consistent and the counter only moves forward.
    rx.changed().await.unwrap();
    let snapshot = rx.borrow();
    assert_eq!(snapshot.data, Some(7));
    assert!(snapshot.completed > first_completed);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_multiple_subscribers_observe_the_same_snapshot() {
    let handle = Poller::spawn("fees", CountingSource::new(), Duration::from_secs(15));
    let mut first = handle.subscribe();
    let mut second = handle.subscribe();

    first.changed().await.unwrap();
    second.changed().await.unwrap();

    assert_eq!(first.borrow().data, second.borrow().data);
    assert_eq!(first.borrow().completed, second.borrow().completed);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_history_recorder_samples_successful_quotes_only() {
    let source = SequenceSource::new(vec![
        Ok(FeeQuote::new(10.0, 5.0, 2.0)),
        Err(502),
        Ok(FeeQuote::new(12.0, 6.0, 3.0)),
    ]);
    let handle = Poller::spawn("fees", source, Duration::from_secs(15));
    let history = Arc::new(RwLock::new(FeeHistory::new(60)));
    let recorder = spawn_history_recorder(handle.subscribe(), Arc::clone(&history));

    let mut rx = handle.subscribe();
    for _ in 0..3 {
        rx.changed().await.unwrap();
        rx.borrow_and_update();
    }
    // Let the recorder drain its channel.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    {
        let history = history.read().unwrap();
        assert_eq!(history.len(), 2, "the failed tick contributes no sample");
        assert_eq!(history.tier_series(FeeTier::Fast), vec![10.0, 12.0]);
    }

    handle.shutdown().await;
    let _ = recorder.await;
}
