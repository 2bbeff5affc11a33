// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for satscan integration tests
//!
//! Provides mock implementations of [`DataSource`] to enable testing the
//! poll and cache layers without real network endpoints.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use satscan::{DataSource, FetchError, SatscanError};

/// Mock source that replays a fixed sequence of outcomes.
///
/// Each fetch pops the next step; once the script is exhausted the final
/// step repeats forever. Errors are expressed as HTTP status codes.
///
/// # Example
///
/// ```rust,ignore
/// // Succeed, fail once, then succeed with a new value forever.
/// let source = SequenceSource::new(vec![Ok(1), Err(502), Ok(2)]);
/// ```
pub struct SequenceSource<T> {
    script: Mutex<VecDeque<Result<T, u16>>>,
    last: Mutex<Option<Result<T, u16>>>,
    calls: AtomicU32,
}

impl<T: Clone> SequenceSource<T> {
    /// Create a source replaying the given steps in order.
    pub fn new(script: Vec<Result<T, u16>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of fetches performed so far.
    #[allow(dead_code)]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> Result<T, u16> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(step) = script.pop_front() {
            *last = Some(step.clone());
            step
        } else {
            last.clone().expect("SequenceSource script must not be empty")
        }
    }
}

#[async_trait]
impl<T> DataSource for SequenceSource<T>
where
    T: Clone + Send + Sync,
{
    type Output = T;

    async fn fetch(&self) -> Result<T, SatscanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next_step()
            .map_err(|status| SatscanError::Fetch(FetchError::bad_status("mock", status)))
    }
}

/// Mock source that counts calls and returns the running count.
pub struct CountingSource {
    calls: AtomicU32,
}

impl CountingSource {
    pub fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for CountingSource {
    type Output = u32;

    async fn fetch(&self) -> Result<u32, SatscanError> {
        Ok(self.calls.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Mock source whose fetch suspends for a fixed duration before resolving.
///
/// Used to exercise in-flight fetches around shutdown and overlapping
/// ticks.
pub struct SlowSource {
    pub delay: std::time::Duration,
    pub value: u32,
}

#[async_trait]
impl DataSource for SlowSource {
    type Output = u32;

    async fn fetch(&self) -> Result<u32, SatscanError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.value)
    }
}
