// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed REST fetchers for the consumed network data endpoints.
//!
//! This module provides a trait-based architecture for retrieving one
//! domain's JSON payload and validating its shape before any downstream
//! code touches it.
//!
//! # Architecture
//!
//! The fetch workflow:
//!
//! 1. [`MempoolClient`] performs the HTTP request for one endpoint
//! 2. A parse function validates the raw JSON (required fields present,
//!    numerics finite) and converts it into a fixed, explicit data shape
//! 3. A thin [`DataSource`] adapter exposes the operation to the poll
//!    scheduler
//!
//! Validation is strict: a payload with a missing or non-numeric field is
//! rejected wholesale — fetchers never return partially-typed data, and
//! rejected payloads are never cached.
//!
//! # Example: Implementing DataSource
//!
//! The poll scheduler consumes any [`DataSource`]; implement it to feed a
//! poller from something other than the bundled client (for example a test
//! double):
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use satscan::{DataSource, FeeQuote, SatscanError};
//!
//! struct StaticQuote(FeeQuote);
//!
//! #[async_trait]
//! impl DataSource for StaticQuote {
//!     type Output = FeeQuote;
//!
//!     async fn fetch(&self) -> Result<FeeQuote, SatscanError> {
//!         Ok(self.0)
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{FetchError, SatscanError};

mod chain;
mod client;
mod fees;
mod series;

pub use chain::{ChainInfoSource, MempoolStatsSource};
pub use client::MempoolClient;
pub use fees::FeeQuoteSource;
pub use series::{HashrateHistorySource, HistorySpan, PriceHistorySource};

/// One pollable data operation.
///
/// The trait is the seam between the fetch layer and the poll scheduler:
/// each domain gets a small adapter implementing it, and tests substitute
/// mock implementations. Implementations must be side-effect-free beyond
/// the network call itself.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// The validated payload type this source produces.
    type Output: Send;

    /// Retrieve and validate one payload.
    async fn fetch(&self) -> Result<Self::Output, SatscanError>;
}

/// Look up a required field in a JSON object payload.
pub(crate) fn require_field<'a>(
    payload: &'a Value,
    operation: &'static str,
    field: &'static str,
) -> Result<&'a Value, FetchError> {
    payload
        .get(field)
        .ok_or_else(|| FetchError::missing_field(operation, field))
}

/// Extract a required finite f64, coercing numeric strings.
///
/// Upstream payloads are duck-typed and occasionally carry numbers as
/// strings; both are accepted, but NaN and infinities are rejected.
pub(crate) fn require_number(
    payload: &Value,
    operation: &'static str,
    field: &'static str,
) -> Result<f64, FetchError> {
    let raw = require_field(payload, operation, field)?;
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(FetchError::invalid_number(operation, field, raw)),
    }
}

/// Extract a required unsigned integer, coercing numeric strings.
pub(crate) fn require_u64(
    payload: &Value,
    operation: &'static str,
    field: &'static str,
) -> Result<u64, FetchError> {
    let raw = require_field(payload, operation, field)?;
    let parsed = match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FetchError::invalid_number(operation, field, raw))
}

/// Extract a required signed integer (epoch timestamps), coercing strings.
pub(crate) fn require_i64(
    payload: &Value,
    operation: &'static str,
    field: &'static str,
) -> Result<i64, FetchError> {
    let raw = require_field(payload, operation, field)?;
    let parsed = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FetchError::invalid_number(operation, field, raw))
}

/// Extract a required array field.
pub(crate) fn require_array<'a>(
    payload: &'a Value,
    operation: &'static str,
    field: &'static str,
) -> Result<&'a Vec<Value>, FetchError> {
    require_field(payload, operation, field)?
        .as_array()
        .ok_or_else(|| {
            FetchError::unexpected_shape(operation, format!("field '{field}' is not an array"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_number_accepts_numbers_and_numeric_strings() {
        let payload = json!({"a": 12.5, "b": "7", "c": " 3.5 "});
        assert_eq!(require_number(&payload, "test", "a").unwrap(), 12.5);
        assert_eq!(require_number(&payload, "test", "b").unwrap(), 7.0);
        assert_eq!(require_number(&payload, "test", "c").unwrap(), 3.5);
    }

    #[test]
    fn test_require_number_rejects_missing_and_non_numeric() {
        let payload = json!({"a": "not a number", "b": null, "c": [1]});
        assert!(matches!(
            require_number(&payload, "test", "missing"),
            Err(FetchError::MissingField { field: "missing", .. })
        ));
        for field in ["a", "b", "c"] {
            assert!(matches!(
                require_number(&payload, "test", field),
                Err(FetchError::InvalidNumber { .. })
            ));
        }
    }

    #[test]
    fn test_require_number_rejects_nan_strings() {
        let payload = json!({"a": "NaN", "b": "inf"});
        assert!(require_number(&payload, "test", "a").is_err());
        assert!(require_number(&payload, "test", "b").is_err());
    }

    #[test]
    fn test_require_u64_rejects_negatives_and_floats() {
        let payload = json!({"a": -1, "b": 1.5, "c": 42});
        assert!(require_u64(&payload, "test", "a").is_err());
        assert!(require_u64(&payload, "test", "b").is_err());
        assert_eq!(require_u64(&payload, "test", "c").unwrap(), 42);
    }

    #[test]
    fn test_require_array_rejects_scalars() {
        let payload = json!({"a": [1, 2], "b": "x"});
        assert_eq!(require_array(&payload, "test", "a").unwrap().len(), 2);
        assert!(matches!(
            require_array(&payload, "test", "b"),
            Err(FetchError::UnexpectedShape { .. })
        ));
    }
}
