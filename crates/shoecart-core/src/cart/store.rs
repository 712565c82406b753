//! The cart store: stock-checked cart mutations with persistence.
//!
//! Every mutation follows the same sequence while holding the writer lock:
//! read the published cart, consult the stock/catalog clients, compute the
//! new cart, save it, then publish it. A failure at any step leaves both the
//! published cart and the saved snapshot untouched and is reported through
//! the [`Notifier`].

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::cart::{Cart, CartPersistence};
use crate::catalog::{CatalogClient, StockClient};
use crate::error::{CartError, CartOperation};
use crate::ids::ProductId;
use crate::notify::Notifier;

/// A published cart together with its version.
///
/// Version 0 is the cart loaded at startup; each successful mutation
/// publishes the next version.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub version: u64,
    pub cart: Arc<Cart>,
}

/// Owns one client's cart.
///
/// Built once at application start and passed to whatever renders the cart.
/// Mutations are serialized: an operation that is waiting on the network
/// holds the writer lock, so a second operation starts from the first one's
/// result instead of overwriting it.
pub struct CartStore {
    catalog: Arc<dyn CatalogClient>,
    stock: Arc<dyn StockClient>,
    persistence: Box<dyn CartPersistence>,
    notifier: Arc<dyn Notifier>,
    writer: Mutex<()>,
    published: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Create a store, loading the saved cart from `persistence`.
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        stock: Arc<dyn StockClient>,
        persistence: Box<dyn CartPersistence>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = persistence.load();
        tracing::debug!(entries = cart.len(), "cart store initialized");

        let (published, _) = watch::channel(CartSnapshot {
            version: 0,
            cart: Arc::new(cart),
        });

        Self {
            catalog,
            stock,
            persistence,
            notifier,
            writer: Mutex::new(()),
            published,
        }
    }

    /// The current cart.
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.published.borrow().cart)
    }

    /// The current cart and its version.
    pub fn snapshot(&self) -> CartSnapshot {
        self.published.borrow().clone()
    }

    /// Watch published carts. The receiver sees the current snapshot
    /// immediately and is notified after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.published.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its amount grows by one,
    /// provided stock allows it. Otherwise the product is fetched from the
    /// catalog and appended with amount 1, provided it is in stock.
    ///
    /// Failures have already been reported to the notifier when this
    /// returns; the error is informational.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add_product(product_id).await;
        self.settle(CartOperation::Add, product_id, result)
    }

    /// Remove a product from the cart.
    ///
    /// Failures have already been reported to the notifier when this returns.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove_product(product_id).await;
        self.settle(CartOperation::Remove, product_id, result)
    }

    /// Set the amount of a product already in the cart.
    ///
    /// `amount` must be at least 1 and no more than current stock.
    /// Failures have already been reported to the notifier when this returns.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let result = self.try_update_product_amount(product_id, amount).await;
        self.settle(CartOperation::UpdateAmount, product_id, result)
    }

    /// Remove every product from the cart.
    pub async fn clear(&self) -> Result<(), CartError> {
        let _writer = self.writer.lock().await;
        let mut cart = self.current();
        cart.clear();

        let result = self.commit(cart);
        match &result {
            Ok(()) => tracing::info!("cleared cart"),
            Err(err) => {
                tracing::warn!(
                    operation = %CartOperation::Clear,
                    error = %err,
                    "cart operation rejected"
                );
                self.notifier
                    .report_error(err.user_message(CartOperation::Clear));
            }
        }
        result
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<i64, CartError> {
        let _writer = self.writer.lock().await;
        let mut cart = self.current();

        let stock = self.stock.stock_by_product_id(product_id).await?;
        tracing::debug!(%product_id, available = stock.amount, "fetched stock");

        match cart.get(product_id).map(|e| e.amount) {
            Some(current) => {
                let shortage = |requested| CartError::StockShortage {
                    product_id,
                    requested,
                    available: stock.amount,
                };
                let requested = current.checked_add(1).ok_or_else(|| shortage(current))?;
                if !stock.can_fulfill(requested) {
                    return Err(shortage(requested));
                }
                cart.set_amount(product_id, requested)?;
                self.commit(cart)?;
                Ok(requested)
            }
            None => {
                if stock.is_out_of_stock() {
                    return Err(CartError::StockShortage {
                        product_id,
                        requested: 1,
                        available: stock.amount,
                    });
                }
                let product = self.catalog.product_by_id(product_id).await?;
                if product.id != product_id {
                    return Err(CartError::ProductNotFound(product_id));
                }
                cart.push(product, 1)?;
                self.commit(cart)?;
                Ok(1)
            }
        }
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<i64, CartError> {
        let _writer = self.writer.lock().await;
        let mut cart = self.current();
        cart.remove(product_id)?;
        self.commit(cart)?;
        Ok(0)
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<i64, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }

        let _writer = self.writer.lock().await;
        let mut cart = self.current();
        if !cart.contains(product_id) {
            return Err(CartError::EntryNotFound(product_id));
        }

        let stock = self.stock.stock_by_product_id(product_id).await?;
        if !stock.can_fulfill(amount) {
            return Err(CartError::StockShortage {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        cart.set_amount(product_id, amount)?;
        self.commit(cart)?;
        Ok(amount)
    }

    /// Copy of the published cart. Only called with the writer lock held.
    fn current(&self) -> Cart {
        self.published.borrow().cart.as_ref().clone()
    }

    /// Save `cart`, then publish it. Only called with the writer lock held.
    fn commit(&self, cart: Cart) -> Result<(), CartError> {
        self.persistence.save(&cart)?;
        self.published.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.cart = Arc::new(cart);
        });
        Ok(())
    }

    /// Log and report the outcome. `result` carries the amount committed for
    /// `product_id`, 0 once removed.
    fn settle(
        &self,
        operation: CartOperation,
        product_id: ProductId,
        result: Result<i64, CartError>,
    ) -> Result<(), CartError> {
        match result {
            Ok(amount) => {
                tracing::info!(%operation, %product_id, amount, "cart updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%operation, %product_id, error = %err, "cart operation rejected");
                self.notifier.report_error(err.user_message(operation));
                Err(err)
            }
        }
    }
}
