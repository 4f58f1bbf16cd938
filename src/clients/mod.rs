//! HTTP transport for the Shopify Admin REST API.
//!
//! # Overview
//!
//! - [`HttpClient`]: authenticated `GET` requests with retry handling
//! - [`HttpRequest`]: a request relative to the versioned base path
//! - [`HttpResponse`]: a response with `Link`, rate limit and retry headers parsed
//! - [`RetryPolicy`]: bounded exponential backoff for throttled requests
//! - [`rest::RestClient`]: the path-normalizing client handle used by resources
//!
//! # Retry Behavior
//!
//! - **429**, or any failure whose body carries the rate-limit marker: retried
//!   after the `Retry-After` delay, or an exponential delay when absent,
//!   until the policy's attempts run out
//! - **Anything else** (4xx, 5xx, network errors): returned immediately

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;
mod retry;

pub use errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse, PaginationInfo};
pub use retry::RetryPolicy;

pub use rest::{RestClient, RestError};
