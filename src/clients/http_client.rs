//! HTTP client for Admin API reads.
//!
//! This module provides the [`HttpClient`] type, which sends authenticated
//! `GET` requests and retries throttled ones under a [`RetryPolicy`].

use std::collections::HashMap;

use crate::classify;
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::RetryPolicy;
use crate::config::{ConnectionConfig, Credentials};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one shop and one access token.
///
/// The client handles:
/// - Base URI construction from the shop domain or the `api_base_url` override
/// - Default headers including `User-Agent` and the access token
/// - Retry of rate-limited responses with bounded exponential backoff
/// - Shopify-specific header parsing
///
/// `HttpClient` is `Send + Sync` and is shared by every request on a
/// connection.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., `/admin/api/2025-10`).
    base_path: String,
    default_headers: HashMap<String, String>,
    retry: RetryPolicy,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `credentials` using the transport settings of
    /// `config`. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be
    /// initialized.
    ///
    /// ```rust
    /// use shopify_tables::clients::HttpClient;
    /// use shopify_tables::{ConnectionConfig, CredentialDefaults};
    ///
    /// let config = ConnectionConfig::builder().token("t").shop_name("my-store").build();
    /// let credentials = config.resolve(&CredentialDefaults::default()).unwrap();
    ///
    /// let client = HttpClient::new("/admin/api/2025-10", &credentials, &config).unwrap();
    /// assert_eq!(client.base_uri(), "https://my-store.myshopify.com");
    /// ```
    pub fn new(
        base_path: impl Into<String>,
        credentials: &Credentials,
        config: &ConnectionConfig,
    ) -> Result<Self, HttpError> {
        let base_uri = config.api_base_url.as_ref().map_or_else(
            || format!("https://{}", credentials.shop.as_ref()),
            |url| url.as_ref().to_string(),
        );

        let user_agent_prefix = config
            .user_agent_prefix
            .as_deref()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}shopify-tables v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Shopify-Access-Token".to_string(),
            credentials.token.as_ref().to_string(),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path: base_path.into(),
            default_headers,
            retry: config.retry.clone(),
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy for this client.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Sends a `GET` request.
    ///
    /// A non-2xx response is retried only when its status is 429 or its error
    /// body carries the rate-limit marker; everything else is returned on the
    /// first failure. The future may be dropped at any point, including
    /// during a backoff sleep.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Network`] if the request could not be sent
    /// - [`HttpError::Response`] for a non-retryable non-2xx response
    /// - [`HttpError::MaxRetries`] when retries are exhausted
    pub async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut req_builder = self.client.get(&url);
            for (key, value) in self.default_headers.iter().chain(&request.extra_headers) {
                req_builder = req_builder.header(key, value);
            }
            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            let res = req_builder.send().await.map_err(|e| {
                tracing::error!(
                    component = "http_client",
                    operation = "get",
                    path = %request.path,
                    error = %e,
                    "request failed to send"
                );
                HttpError::Network(e)
            })?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let response = HttpResponse::new(code, res_headers, Self::parse_body(&body_text));

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to Shopify API at {}, received reason: {}",
                    request.path,
                    reason
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = response.serialize_error();
            let error_reference = response.request_id().map(String::from);

            let retryable = code == 429 || classify::is_rate_limit_message(&error_message);
            if !retryable || !self.retry.allows_another(attempt) {
                tracing::warn!(
                    component = "http_client",
                    operation = "get",
                    path = %request.path,
                    status = code,
                    attempt,
                    error = %error_message,
                    "request failed"
                );

                if retryable && self.retry.max_attempts > 1 {
                    return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                        code,
                        tries: attempt,
                        message: error_message,
                        error_reference,
                    }));
                }
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = self.retry.delay_for(attempt, response.retry_request_after);
            tracing::debug!(
                component = "http_client",
                operation = "get",
                path = %request.path,
                status = code,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "rate limited, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a body as JSON. A non-JSON body is kept as the `errors` text so
    /// it still reaches the error classifiers.
    fn parse_body(body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text)
            .unwrap_or_else(|_| serde_json::json!({ "errors": body_text }))
    }
}
