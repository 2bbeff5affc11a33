//! Span creation helpers for satscan operations.
//!
//! This module provides span creation functions following an orthogonal
//! design pattern where telemetry concerns are separated from business
//! logic. Instead of using `#[instrument]` attributes directly on functions,
//! each instrumented operation has a corresponding span helper function in
//! this module.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use tracing::Span;

/// Create span for a cache-wrapped fetch of one key.
///
/// Parent: None (root span for this operation)
/// Children: fetch_endpoint spans (one per attempt)
#[inline]
pub(crate) fn fetch_with_cache(key: &str) -> Span {
    tracing::info_span!("satscan.fetch_with_cache", key = %key)
}

/// Create span for one REST endpoint request.
///
/// Parent: fetch_with_cache span, or a poll tick when uncached
/// Children: None
#[inline]
pub(crate) fn fetch_endpoint(operation: &'static str) -> Span {
    tracing::debug_span!("satscan.fetch_endpoint", operation = operation)
}

/// Create span for publishing one completed poll fetch.
///
/// Parent: None (publication happens on a detached task)
/// Children: None
#[inline]
pub(crate) fn poll_publish(domain: &'static str, tick: u64) -> Span {
    tracing::debug_span!("satscan.poll_publish", domain = domain, tick = tick)
}

/// Create span for adjusting a fee quote for a wallet profile.
///
/// Parent: caller's span
/// Children: None (pure computation)
#[inline]
pub(crate) fn adjust_fee(wallet: &str) -> Span {
    tracing::trace_span!("satscan.adjust_fee", wallet = %wallet)
}
