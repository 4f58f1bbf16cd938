//! REST-specific error types.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for [`RestClient`](super::RestClient) operations.
///
/// ```rust
/// use shopify_tables::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: String::new() };
/// assert_eq!(error.to_string(), "Invalid REST API path: ");
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}
