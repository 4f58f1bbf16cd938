//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: a non-2xx response that was not retried
//! - [`MaxHttpRetriesExceededError`]: a rate-limited request that kept failing
//! - [`HttpError`]: the union of the above plus network failures
//!
//! Both response errors carry the serialized error body as their message,
//! so the textual classifiers in [`crate::classify`] can inspect them.

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// The `message` holds the `errors` / `error` fields of the response body
/// serialized as JSON, e.g. `{"errors":"Not Found"}`.
///
/// ```rust
/// use shopify_tables::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"errors":"Not Found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
/// assert!(error.to_string().contains("Not Found"));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when a retry-eligible request exhausted its attempts.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of attempts made.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Network, TLS, or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::Network(_) => None,
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
