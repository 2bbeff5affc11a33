//! Error types for the satscan library.
//!
//! This module provides strongly-typed errors for all public APIs in satscan.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling
//!   (`FetchError`, `CacheError`, `FeeAdjustError`)
//! - **Unified error type** (`SatscanError`) for convenience when you don't
//!   need to distinguish between error sources
//!
//! # Architecture
//!
//! Each major module has its own error type:
//! - [`FetchError`] - Errors from REST fetching and payload validation
//! - [`CacheError`] - Errors from the stale-while-revalidate cache store
//! - [`FeeAdjustError`] - Errors from wallet fee adjustment
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use satscan::{CacheError, CacheStore};
//!
//! async fn example(store: &CacheStore) {
//!     match store.fetch_with_cache("fees:quote", fetch_fn, &options).await {
//!         Ok(quote) => println!("Quote: {:?}", quote),
//!         Err(CacheError::RetriesExhausted { key, attempts, .. }) => {
//!             eprintln!("Gave up on {key} after {attempts} retries");
//!         }
//!         Err(e) => eprintln!("Other error: {e}"),
//!     }
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use satscan::{MempoolClient, SatscanError};
//!
//! async fn example(client: &MempoolClient) -> Result<(), SatscanError> {
//!     let quote = client.fetch_fee_quote().await?;
//!     // Errors automatically convert to SatscanError via From implementations
//!     Ok(())
//! }
//! ```

mod cache;
mod fees;
mod fetch;

pub use cache::CacheError;
pub use fees::FeeAdjustError;
pub use fetch::FetchError;

/// Unified error type for all satscan operations.
///
/// This enum wraps all module-specific error types, providing a convenient
/// way to handle errors when you don't need to distinguish between different
/// error sources.
///
/// All module-specific error types automatically convert to `SatscanError`
/// via `From` implementations, so you can use `?` to propagate errors
/// naturally.
#[derive(Debug, thiserror::Error)]
pub enum SatscanError {
    /// Error from REST fetching and payload validation.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from the cache store.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from fee adjustment.
    #[error("Fee adjustment error: {0}")]
    FeeAdjust(#[from] FeeAdjustError),
}
