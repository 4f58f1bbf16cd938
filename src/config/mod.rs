//! Connection configuration and credential resolution.
//!
//! # Overview
//!
//! - [`ConnectionConfig`]: per-connection settings, all optional
//! - [`ConnectionConfigBuilder`]: a builder for [`ConnectionConfig`]
//! - [`CredentialDefaults`]: environment-sourced fallbacks for the credentials
//! - [`Credentials`]: the validated token and shop a client is built from
//! - [`AccessToken`], [`ShopDomain`], [`ApiBaseUrl`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version to call
//!
//! # Precedence
//!
//! A value set on the connection wins over the environment default. A
//! blank value counts as unset. When neither source supplies a required
//! field, resolution fails with [`ConfigError::MissingRequiredField`].
//!
//! ```rust
//! use shopify_tables::{ConnectionConfig, CredentialDefaults};
//!
//! let defaults = CredentialDefaults::new(Some("env-token"), Some("env-shop"));
//! let config = ConnectionConfig::builder().shop_name("my-store").build();
//!
//! let credentials = config.resolve(&defaults).unwrap();
//! assert_eq!(credentials.token.as_ref(), "env-token");
//! assert_eq!(credentials.shop.shop_name(), "my-store");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ApiBaseUrl, ShopDomain};
pub use version::ApiVersion;

use serde::Deserialize;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Environment variable holding the default access token.
pub const TOKEN_ENV_VAR: &str = "SHOPIFY_API_TOKEN";

/// Environment variable holding the default shop name.
pub const SHOP_NAME_ENV_VAR: &str = "SHOPIFY_SHOP_NAME";

/// Settings for one logical connection.
///
/// Deserializes from the connection block of a host configuration; every
/// field is optional.
///
/// ```rust
/// use shopify_tables::ConnectionConfig;
///
/// let config: ConnectionConfig = serde_json::from_str(
///     r#"{"token": "shpat_1", "shop_name": "my-store", "api_version": "2025-07"}"#,
/// ).unwrap();
/// assert_eq!(config.shop_name.as_deref(), Some("my-store"));
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Admin API access token.
    pub token: Option<String>,
    /// Shop name or full `*.myshopify.com` domain.
    pub shop_name: Option<String>,
    /// Admin API version. Defaults to [`ApiVersion::latest`].
    pub api_version: Option<ApiVersion>,
    /// Replaces the `https://<shop>.myshopify.com` origin.
    pub api_base_url: Option<ApiBaseUrl>,
    /// Prepended to the `User-Agent` header.
    pub user_agent_prefix: Option<String>,
    /// Backoff applied to rate-limited requests.
    pub retry: RetryPolicy,
}

// Verify ConnectionConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectionConfig>();
};

impl ConnectionConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    /// Returns the configured API version or the latest one.
    #[must_use]
    pub fn api_version(&self) -> ApiVersion {
        self.api_version.clone().unwrap_or_default()
    }

    /// Resolves the credentials for this connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming `token` or
    /// `shop_name` when neither this config nor `defaults` supplies it, and
    /// [`ConfigError::InvalidShopDomain`] when the shop name is malformed.
    pub fn resolve(&self, defaults: &CredentialDefaults) -> Result<Credentials, ConfigError> {
        let token = pick(self.token.as_deref(), defaults.token.as_deref())
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;
        let shop_name = pick(self.shop_name.as_deref(), defaults.shop_name.as_deref())
            .ok_or(ConfigError::MissingRequiredField { field: "shop_name" })?;

        Ok(Credentials {
            token: AccessToken::new(token)?,
            shop: ShopDomain::new(shop_name)?,
        })
    }
}

fn pick<'a>(explicit: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    let present = |value: &&str| !value.trim().is_empty();
    explicit.filter(present).or_else(|| fallback.filter(present))
}

/// Builder for [`ConnectionConfig`].
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    /// Sets the access token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Sets the shop name.
    #[must_use]
    pub fn shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.config.shop_name = Some(shop_name.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.config.api_version = Some(version);
        self
    }

    /// Routes requests to `url` instead of the shop's own domain.
    #[must_use]
    pub fn api_base_url(mut self, url: ApiBaseUrl) -> Self {
        self.config.api_base_url = Some(url);
        self
    }

    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the retry policy for rate-limited requests.
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Builds the [`ConnectionConfig`]. Validation happens at
    /// [`ConnectionConfig::resolve`].
    #[must_use]
    pub fn build(self) -> ConnectionConfig {
        self.config
    }
}

/// Fallback credentials, normally read from the process environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialDefaults {
    token: Option<String>,
    shop_name: Option<String>,
}

impl CredentialDefaults {
    /// Creates defaults from explicit values.
    #[must_use]
    pub fn new(token: Option<&str>, shop_name: Option<&str>) -> Self {
        Self {
            token: token.map(ToString::to_string),
            shop_name: shop_name.map(ToString::to_string),
        }
    }

    /// Reads [`TOKEN_ENV_VAR`] and [`SHOP_NAME_ENV_VAR`].
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            token: std::env::var(TOKEN_ENV_VAR).ok(),
            shop_name: std::env::var(SHOP_NAME_ENV_VAR).ok(),
        }
    }
}

/// Validated credentials for one connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The access token sent as `X-Shopify-Access-Token`.
    pub token: AccessToken,
    /// The shop the token belongs to.
    pub shop: ShopDomain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_override_defaults() {
        let defaults = CredentialDefaults::new(Some("env-token"), Some("env-shop"));
        let config = ConnectionConfig::builder()
            .token("conn-token")
            .shop_name("conn-shop")
            .build();

        let credentials = config.resolve(&defaults).unwrap();
        assert_eq!(credentials.token.as_ref(), "conn-token");
        assert_eq!(credentials.shop.shop_name(), "conn-shop");
    }

    #[test]
    fn test_defaults_fill_missing_values() {
        let defaults = CredentialDefaults::new(Some("env-token"), Some("env-shop"));
        let credentials = ConnectionConfig::default().resolve(&defaults).unwrap();

        assert_eq!(credentials.token.as_ref(), "env-token");
        assert_eq!(credentials.shop.as_ref(), "env-shop.myshopify.com");
    }

    #[test]
    fn test_blank_explicit_value_falls_back_to_default() {
        let defaults = CredentialDefaults::new(Some("env-token"), Some("env-shop"));
        let config = ConnectionConfig::builder().token("  ").build();

        let credentials = config.resolve(&defaults).unwrap();
        assert_eq!(credentials.token.as_ref(), "env-token");
    }

    #[test]
    fn test_missing_token_names_token_field() {
        let defaults = CredentialDefaults::new(None, Some("env-shop"));
        let result = ConnectionConfig::default().resolve(&defaults);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_missing_shop_names_shop_field() {
        let defaults = CredentialDefaults::new(Some("env-token"), Some(""));
        let result = ConnectionConfig::default().resolve(&defaults);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop_name" })
        ));
    }

    #[test]
    fn test_malformed_shop_is_rejected() {
        let config = ConnectionConfig::builder()
            .token("t")
            .shop_name("not a shop")
            .build();

        assert!(matches!(
            config.resolve(&CredentialDefaults::default()),
            Err(ConfigError::InvalidShopDomain { .. })
        ));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ConnectionConfig = serde_json::from_str(
            r#"{"token": "t", "api_base_url": "http://localhost:9000", "retry": {"max_attempts": 2}}"#,
        )
        .unwrap();

        assert_eq!(config.api_version(), ApiVersion::latest());
        assert_eq!(config.retry.max_attempts, 2);
        assert!(config.shop_name.is_none());
        assert_eq!(
            config.api_base_url.unwrap().as_ref(),
            "http://localhost:9000"
        );
    }
}
