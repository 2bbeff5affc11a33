//! Error types for REST data fetching.
//!
//! This module provides error types for operations in the `fetch` module,
//! covering transport failures, non-success HTTP statuses, and payload
//! validation failures at the fetcher boundary.

/// Errors that can occur when fetching and validating upstream payloads.
///
/// Transport and status failures are transient by nature and may be absorbed
/// by the cache layer when a usable fallback entry exists. Validation
/// failures (`MissingField`, `InvalidNumber`, `Decode`) indicate a malformed
/// upstream payload; these are rejected at the fetcher boundary and never
/// cached.
///
/// # Examples
///
/// ```rust,ignore
/// use satscan::{FetchError, MempoolClient};
///
/// async fn example(client: &MempoolClient) {
///     match client.fetch_fee_quote().await {
///         Ok(quote) => println!("Fee quote: {:?}", quote),
///         Err(FetchError::Status { operation, status }) => {
///             eprintln!("Upstream returned {status} for {operation}, will retry");
///         }
///         Err(FetchError::MissingField { field, .. }) => {
///             eprintln!("Malformed payload, field {field} absent");
///         }
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The configured endpoint base URL could not be parsed.
    #[error("Invalid endpoint URL: {url}")]
    InvalidUrl {
        /// The URL string that failed to parse
        url: String,
    },

    /// The HTTP request itself failed (connection, timeout, TLS).
    ///
    /// This is the classic transient failure: the upstream may simply be
    /// unreachable right now.
    #[error("HTTP request failed for {operation}")]
    Http {
        /// Description of the operation that failed (e.g., "fee quote")
        operation: &'static str,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status code.
    #[error("Upstream returned status {status} for {operation}")]
    Status {
        /// Description of the operation that failed
        operation: &'static str,
        /// The HTTP status code received
        status: u16,
    },

    /// The response body was not valid JSON (or not the expected scalar).
    #[error("Failed to decode response body for {operation}")]
    Decode {
        /// Description of the operation that failed
        operation: &'static str,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A required field was absent from the payload.
    ///
    /// Fetchers validate the full response shape before returning; a missing
    /// field means the payload is rejected wholesale, never returned
    /// partially typed.
    #[error("Required field '{field}' missing in {operation} payload")]
    MissingField {
        /// Description of the operation whose payload was malformed
        operation: &'static str,
        /// Name of the absent field
        field: &'static str,
    },

    /// A field was present but did not parse to a finite number.
    ///
    /// Covers both non-numeric JSON values and numeric strings that coerce
    /// to NaN or infinity.
    #[error("Field '{field}' in {operation} payload is not a finite number: {value}")]
    InvalidNumber {
        /// Description of the operation whose payload was malformed
        operation: &'static str,
        /// Name of the offending field
        field: &'static str,
        /// Display form of the rejected value
        value: String,
    },

    /// The payload parsed as JSON but did not have the expected structure.
    ///
    /// Examples: a field that should be an array is an object, or a
    /// timestamp is outside the representable range.
    #[error("Unexpected {operation} payload shape: {detail}")]
    UnexpectedShape {
        /// Description of the operation whose payload was malformed
        operation: &'static str,
        /// What was wrong with the structure
        detail: String,
    },
}

impl FetchError {
    /// Helper to create an `Http` error for a named operation.
    pub fn http(operation: &'static str, source: reqwest::Error) -> Self {
        FetchError::Http { operation, source }
    }

    /// Helper to create a `Status` error for a named operation.
    pub fn bad_status(operation: &'static str, status: u16) -> Self {
        FetchError::Status { operation, status }
    }

    /// Helper to create a `Decode` error for a named operation.
    pub fn decode(operation: &'static str, source: serde_json::Error) -> Self {
        FetchError::Decode { operation, source }
    }

    /// Helper to create a `MissingField` error.
    pub fn missing_field(operation: &'static str, field: &'static str) -> Self {
        FetchError::MissingField { operation, field }
    }

    /// Helper to create an `InvalidNumber` error from any displayable value.
    pub fn invalid_number(
        operation: &'static str,
        field: &'static str,
        value: impl std::fmt::Display,
    ) -> Self {
        FetchError::InvalidNumber {
            operation,
            field,
            value: value.to_string(),
        }
    }

    /// Helper to create an `UnexpectedShape` error.
    pub fn unexpected_shape(operation: &'static str, detail: impl Into<String>) -> Self {
        FetchError::UnexpectedShape {
            operation,
            detail: detail.into(),
        }
    }
}
