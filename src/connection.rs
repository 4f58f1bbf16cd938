//! Per-connection context.
//!
//! A [`Connection`] is passed explicitly to every table call. It resolves
//! its credentials and builds its [`RestClient`] on first use, then hands
//! out the same client for the rest of its lifetime. It also owns the memo
//! for values that are constant per connection, such as the shop name.

use std::sync::{Arc, Mutex, PoisonError};

use crate::clients::RestClient;
use crate::config::{ConnectionConfig, CredentialDefaults};
use crate::engine::Memo;
use crate::error::Error;
use crate::rest::resources::Shop;

const SHOP_NAME_KEY: &str = "shop_name";

/// One configured connection to a shop.
///
/// ```rust
/// use shopify_tables::{Connection, ConnectionConfig, CredentialDefaults};
///
/// let config = ConnectionConfig::builder().token("shpat_1").shop_name("my-store").build();
/// let connection = Connection::with_defaults("shopify", config, CredentialDefaults::default());
///
/// let first = connection.client().unwrap();
/// let second = connection.client().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct Connection {
    name: String,
    config: ConnectionConfig,
    defaults: CredentialDefaults,
    client: Mutex<Option<Arc<RestClient>>>,
    memo: Memo<&'static str, String>,
}

// Verify Connection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connection>();
};

impl Connection {
    /// Creates a connection whose fallbacks come from the environment.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ConnectionConfig) -> Self {
        Self::with_defaults(name, config, CredentialDefaults::from_env())
    }

    /// Creates a connection with explicit fallbacks.
    #[must_use]
    pub fn with_defaults(
        name: impl Into<String>,
        config: ConnectionConfig,
        defaults: CredentialDefaults,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            defaults,
            client: Mutex::new(None),
            memo: Memo::new(),
        }
    }

    /// Returns the connection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the connection configuration.
    #[must_use]
    pub const fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Returns the client for this connection, building it on first use.
    ///
    /// No remote call is made here; the token is first checked by the API
    /// on the first real request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token or shop name is missing or
    /// invalid. The failure is not cached.
    pub fn client(&self) -> Result<Arc<RestClient>, Error> {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let credentials = self.config.resolve(&self.defaults).map_err(|e| {
            tracing::error!(
                component = "connection",
                operation = "client",
                connection = %self.name,
                error = %e,
                "invalid connection configuration"
            );
            e
        })?;

        let client = Arc::new(RestClient::new(&credentials, &self.config)?);
        tracing::debug!(
            component = "connection",
            operation = "client",
            connection = %self.name,
            shop = credentials.shop.as_ref(),
            "client created"
        );

        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Drops the cached client; the next [`client`](Self::client) call
    /// builds a new one.
    pub fn evict_client(&self) {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Returns the shop's display name, fetched once per connection.
    ///
    /// Concurrent first calls share one remote request. If the shop has no
    /// display name, the configured shop name is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the client cannot be built or the request
    /// fails. Failures are not cached.
    pub async fn shop_name(&self) -> Result<String, Error> {
        self.memo
            .get_or_try_init(SHOP_NAME_KEY, || async {
                let client = self.client()?;
                let shop = Shop::current(&client).await.map_err(|e| {
                    tracing::error!(
                        component = "connection",
                        operation = "shop_name",
                        connection = %self.name,
                        error = %e,
                        "failed to fetch shop"
                    );
                    e
                })?;

                let name = match shop.into_inner().name {
                    Some(name) if !name.is_empty() => name,
                    _ => self.config.resolve(&self.defaults)?.shop.shop_name().to_string(),
                };
                Ok::<_, Error>(name)
            })
            .await
    }
}
