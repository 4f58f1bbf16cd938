//! # Shopify Tables
//!
//! Read-only tabular access to Shopify Admin REST resources.
//!
//! The crate turns a logical "list all X" or "get X by id" request into
//! correctly paginated, rate-limited and cancellable calls against the Admin
//! REST API, and streams the results into a caller-supplied sink under an
//! optional row budget.
//!
//! ## Overview
//!
//! - [`Connection`]: explicit per-connection context that resolves
//!   credentials, caches one [`RestClient`] and memoizes the shop name
//! - [`classify`]: textual not-found and rate-limit classification
//! - [`engine`]: the paginated list engine, parent/child fan-out,
//!   get-by-id and single-flight memoization
//! - [`rest`]: typed read-only resources (orders, products, variants,
//!   collections, customers, themes, draft orders, metafields, shop)
//! - [`Table`], [`list_rows`] and [`get_row`]: the table surface a query
//!   host consumes
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_tables::{Connection, ConnectionConfig, CredentialDefaults, Table};
//!
//! let config = ConnectionConfig::builder()
//!     .token("shpat_xxx")
//!     .shop_name("my-store")
//!     .build();
//!
//! // Environment values fill in whatever the configuration leaves unset.
//! let connection = Connection::with_defaults("shopify", config, CredentialDefaults::default());
//! assert!(connection.client().is_ok());
//!
//! let table: Table = "shopify_order".parse().unwrap();
//! assert_eq!(table, Table::Order);
//! ```
//!
//! ## Listing Rows
//!
//! ```rust,ignore
//! use shopify_tables::engine::CollectingSink;
//! use shopify_tables::{list_rows, Connection, ConnectionConfig, Table, TableOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! let connection = Connection::new("shopify", ConnectionConfig::default());
//! let mut sink = CollectingSink::with_budget(Some(100));
//!
//! let outcome = list_rows(
//!     &connection,
//!     Table::Product,
//!     &TableOptions { metafields: true, ..Default::default() },
//!     &mut sink,
//!     &CancellationToken::new(),
//! )
//! .await?;
//!
//! println!("{} rows in {} pages", outcome.emitted, outcome.pages);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: connections are values passed to every call
//! - **Fail-fast validation**: configuration problems surface before any
//!   remote call
//! - **Thread-safe**: all shared types are `Send + Sync`
//! - **Sequential paging**: one logical request never runs pages or parents
//!   in parallel, so emission order equals server order

pub mod classify;
pub mod clients;
pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod rest;
pub mod tables;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiBaseUrl, ApiVersion, ConnectionConfig, ConnectionConfigBuilder,
    CredentialDefaults, Credentials, ShopDomain,
};
pub use connection::Connection;
pub use error::{ConfigError, Error, TableError};
pub use tables::{get_row, list_rows, Table, TableOptions};

// Re-export HTTP client types
pub use clients::{
    ApiCallLimit, HttpClient, HttpError, HttpResponse, HttpResponseError,
    MaxHttpRetriesExceededError, PaginationInfo, RestClient, RestError, RetryPolicy,
};
