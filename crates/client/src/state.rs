//! Client state shared by every front-end command.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::cart::CartStore;
use crate::checkout::CheckoutFlow;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::SessionStore;
use crate::storage::{FileStore, KeyValueStore};

/// The API client plus the cart, session and checkout staging stores.
///
/// This struct is cheaply cloneable via `Arc`; clones share the same stores.
#[derive(Clone)]
pub struct Shopfront {
    inner: Arc<ShopfrontInner>,
}

struct ShopfrontInner {
    config: ClientConfig,
    api: ApiClient,
    cart: CartStore,
    session: SessionStore,
    staging: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Shopfront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shopfront")
            .field("api", &self.inner.api)
            .field("cart", &self.inner.cart)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl Shopfront {
    /// Open the stores under the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        let persistent: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.persistent_dir()));
        let staging: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.staging_dir()));
        Self::with_stores(config, persistent, staging)
    }

    /// Build over caller-provided stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_stores(
        config: ClientConfig,
        persistent: Arc<dyn KeyValueStore>,
        staging: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config)?;
        let cart = CartStore::load(Arc::clone(&persistent));
        let session = SessionStore::load(api.clone(), persistent);

        Ok(Self {
            inner: Arc::new(ShopfrontInner {
                config,
                api,
                cart,
                session,
                staging,
            }),
        })
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the session.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Start a checkout over the cart and the staging store.
    #[must_use]
    pub fn checkout(&self) -> CheckoutFlow<'_> {
        CheckoutFlow::new(&self.inner.api, &self.inner.cart, self.inner.staging.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_persist_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::for_api_url("http://localhost:8080/api", dir.path()).unwrap();

        let shop = Shopfront::open(config.clone()).unwrap();
        assert!(shop.cart().items().is_empty());
        assert!(!shop.session().is_logged_in());

        shop.cart().add_to_cart(
            serde_json::from_value(serde_json::json!({
                "productId": 1, "name": "Wireless Mouse", "price": 29.99, "stock": 50
            }))
            .unwrap(),
            2,
        );
        assert!(dir.path().join("local").join("shopping_cart").exists());

        let reopened = Shopfront::open(config).unwrap();
        assert_eq!(reopened.cart().item_count(), 2);
    }
}
