//! In-memory catalog.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{CatalogClient, LookupError, Product, Stock, StockClient};
use crate::ids::ProductId;

#[derive(Debug, Default)]
struct Inventory {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
    offline: bool,
}

/// Catalog and stock source held entirely in memory.
///
/// Stock levels can be changed at any time, mimicking stock moving on the
/// server between two cart operations. Every lookup yields to the scheduler
/// once before answering, so concurrent cart operations interleave the same
/// way they do against a real network.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: Mutex<Inventory>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product together with its stock level.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.insert(product, stock);
        self
    }

    /// Add or replace a product and its stock level.
    pub fn insert(&self, product: Product, stock: i64) {
        let mut inner = self.lock();
        inner.stock.insert(product.id, stock);
        inner.products.insert(product.id, product);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        self.lock().stock.insert(id, amount);
    }

    /// Drop a product's metadata while keeping its stock record.
    pub fn remove_product(&self, id: ProductId) {
        self.lock().products.remove(&id);
    }

    /// When offline, every lookup fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// All products, ordered by id.
    pub fn products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.lock().products.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn product_by_id(&self, id: ProductId) -> Result<Product, LookupError> {
        tokio::task::yield_now().await;
        let inner = self.lock();
        if inner.offline {
            return Err(LookupError::Transport("catalog offline".to_string()));
        }
        inner
            .products
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound(id))
    }
}

#[async_trait]
impl StockClient for InMemoryCatalog {
    async fn stock_by_product_id(&self, id: ProductId) -> Result<Stock, LookupError> {
        tokio::task::yield_now().await;
        let inner = self.lock();
        if inner.offline {
            return Err(LookupError::Transport("stock service offline".to_string()));
        }
        inner
            .stock
            .get(&id)
            .map(|amount| Stock::new(id, *amount))
            .ok_or(LookupError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker(id: u64) -> Product {
        Product::new(ProductId::new(id), format!("Tênis {}", id), 139.9, "img.jpg")
    }

    #[tokio::test]
    async fn test_lookup_product_and_stock() {
        let catalog = InMemoryCatalog::new().with_product(sneaker(1), 5);

        let product = catalog.product_by_id(ProductId::new(1)).await.unwrap();
        assert_eq!(product.title, "Tênis 1");

        let stock = catalog.stock_by_product_id(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 5);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog.product_by_id(ProductId::new(3)).await.unwrap_err();
        assert_eq!(err, LookupError::NotFound(ProductId::new(3)));
    }

    #[tokio::test]
    async fn test_offline_is_transport_error() {
        let catalog = InMemoryCatalog::new().with_product(sneaker(1), 5);
        catalog.set_offline(true);

        let err = catalog.stock_by_product_id(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }

    #[test]
    fn test_products_sorted() {
        let catalog = InMemoryCatalog::new()
            .with_product(sneaker(3), 1)
            .with_product(sneaker(1), 1);
        let ids: Vec<u64> = catalog.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
