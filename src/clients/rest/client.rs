//! REST client for the Admin API.

use std::collections::BTreeMap;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ConnectionConfig, Credentials};

/// REST client bound to one shop and API version.
///
/// Wraps [`HttpClient`] with the versioned `/admin/api/<version>` base path
/// and path normalization. This is the client handle a connection caches and
/// every request on that connection shares.
///
/// ```rust
/// use shopify_tables::clients::RestClient;
/// use shopify_tables::{ApiVersion, ConnectionConfig, CredentialDefaults};
///
/// let config = ConnectionConfig::builder()
///     .token("shpat_1")
///     .shop_name("my-store")
///     .api_version(ApiVersion::V2025_07)
///     .build();
/// let credentials = config.resolve(&CredentialDefaults::default()).unwrap();
///
/// let client = RestClient::new(&credentials, &config).unwrap();
/// assert_eq!(client.api_version(), &ApiVersion::V2025_07);
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a REST client. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(credentials: &Credentials, config: &ConnectionConfig) -> Result<Self, RestError> {
        let api_version = config.api_version();
        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(base_path, credentials, config)?;

        tracing::debug!(
            component = "rest_client",
            shop = credentials.shop.as_ref(),
            api_version = %api_version,
            "created REST client"
        );

        Ok(Self {
            http_client,
            api_version,
        })
    }

    /// Returns the API version used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a `GET` request to `path` (e.g. `"products"`, `"orders/123"`).
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty and
    /// [`RestError::Http`] for HTTP-level failures.
    pub async fn get(
        &self,
        path: &str,
        query: BTreeMap<String, String>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;
        let request = HttpRequest::builder(normalized_path).query(query).build();

        Ok(self.http_client.request(&request).await?)
    }
}

/// Strips leading `/`, strips and re-adds `.json`, and rejects empty paths.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(format!("{path}.json"))
}
