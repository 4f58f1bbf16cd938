//! Error types for the retrieval engine.
//!
//! Configuration problems are reported through [`ConfigError`]. They are
//! terminal: a connection whose credentials cannot be resolved never issues a
//! remote call. Remote failures are reported through
//! [`ResourceError`](crate::rest::ResourceError), and [`Error`] joins both for
//! the table-level entry points.
//!
//! # Example
//!
//! ```rust
//! use shopify_tables::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

use crate::clients::RestError;
use crate::rest::ResourceError;

/// Errors that can occur while resolving a connection's configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field was supplied by neither the connection nor the environment.
    #[error("'{field}' must be set in the connection configuration. Edit your connection configuration file and then restart.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The API base URL override is malformed.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Errors raised by the table surface before any remote call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No table has the given name.
    #[error("Unknown table '{name}'.")]
    UnknownTable {
        /// The name that was looked up.
        name: String,
    },

    /// The table has no single key column, so rows cannot be fetched by id.
    #[error("Table '{table}' does not support lookup by id.")]
    NoKeyColumn {
        /// The table name.
        table: &'static str,
    },
}

/// Crate-level error returned by connection and table operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The client handle could not be built from a resolved configuration.
    #[error(transparent)]
    Client(#[from] RestError),

    /// A remote call failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The table request itself was invalid.
    #[error(transparent)]
    Table(#[from] TableError),
}

// Verify Error is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
};
