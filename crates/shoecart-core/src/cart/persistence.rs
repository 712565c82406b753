//! Cart snapshot persistence.

use shoecart_cache::{cache_key, Cache, KeyValueStore};

use crate::cart::Cart;
use crate::error::CartError;

/// Namespace of the storefront's local storage keys.
pub const STORAGE_NAMESPACE: &str = "@RocketShoes";

/// Default key holding the serialized cart.
pub fn default_cart_key() -> String {
    cache_key!(STORAGE_NAMESPACE, "cart")
}

/// Loads and saves the cart snapshot.
///
/// The cart store only goes through this interface and never touches storage
/// mechanics directly.
pub trait CartPersistence: Send + Sync {
    /// Load the last saved cart. Absent or unreadable state yields an empty cart.
    fn load(&self) -> Cart;

    /// Save `cart`, replacing the previous snapshot.
    fn save(&self, cart: &Cart) -> Result<(), CartError>;
}

/// [`CartPersistence`] over a key-value store, one key for the whole cart.
pub struct KvCartPersistence<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> KvCartPersistence<S> {
    /// Persist under the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, default_cart_key())
    }

    /// Persist under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> CartPersistence for KvCartPersistence<S> {
    fn load(&self) -> Cart {
        match self.cache.get::<Cart>(&self.key) {
            Ok(Some(cart)) => {
                tracing::debug!(key = %self.key, entries = cart.len(), "loaded cart snapshot");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable cart snapshot");
                Cart::new()
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        self.cache.set(&self.key, cart)?;
        Ok(())
    }
}
