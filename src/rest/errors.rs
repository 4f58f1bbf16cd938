//! Resource-level error types.
//!
//! HTTP failures are mapped to semantic variants where the status carries
//! meaning for a resource:
//!
//! - **404**: [`ResourceError::NotFound`]
//! - **everything else**: [`ResourceError::Http`] with the serialized body
//!
//! `NotFound` keeps the server's error body as its message. Textual
//! suppression matches that body, so a 404 is only treated as a missing row
//! when the server said so.

use crate::clients::{HttpError, RestError};
use thiserror::Error;

/// Error type for resource operations.
///
/// ```rust
/// use shopify_tables::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Order",
///     id: "42".to_string(),
///     message: r#"{"errors":"Not Found"}"#.to_string(),
/// };
/// assert_eq!(error.to_string(), r#"Order with id 42: {"errors":"Not Found"}"#);
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource, or the parent it was listed under, does not exist.
    #[error("{resource} with id {id}: {message}")]
    NotFound {
        /// The resource type name.
        resource: &'static str,
        /// The requested id, or `unknown` for listings.
        id: String,
        /// The server's error body.
        message: String,
    },

    /// No path template matches the operation and the ids at hand.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The resource type name.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The response body did not hold the expected payload.
    #[error("Failed to decode '{key}' for {resource}: {message}")]
    Deserialization {
        /// The resource type name.
        resource: &'static str,
        /// The body key that was read.
        key: String,
        /// Decoder detail.
        message: String,
    },

    /// List parameters could not be encoded as a query string.
    #[error("Invalid list parameters for {resource}: {message}")]
    InvalidParams {
        /// The resource type name.
        resource: &'static str,
        /// Encoder detail.
        message: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST client error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Maps a client failure for `resource` into a resource error, turning
    /// a 404 into [`ResourceError::NotFound`].
    #[must_use]
    pub fn from_rest(error: RestError, resource: &'static str, id: Option<&str>) -> Self {
        match error {
            RestError::Http(HttpError::Response(e)) if e.code == 404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
                message: e.message,
            },
            RestError::Http(e) => Self::Http(e),
            other => Self::Rest(other),
        }
    }

    /// Returns the request id associated with this error, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) | Self::Rest(RestError::Http(HttpError::Response(e))) => {
                e.error_reference.as_deref()
            }
            Self::Http(HttpError::MaxRetries(e))
            | Self::Rest(RestError::Http(HttpError::MaxRetries(e))) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
