//! REST client for the Shopify Admin API.
//!
//! [`RestClient`] adds the versioned base path and path normalization on top
//! of [`HttpClient`](crate::clients::HttpClient):
//!
//! - Leading slashes are stripped: `/products` -> `products.json`
//! - A trailing `.json` is stripped and re-added: `products.json` -> `products.json`
//! - An empty path is rejected with [`RestError::InvalidPath`]

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
