//! Catalog and stock lookups.
//!
//! The cart store only ever talks to the storefront API through these two
//! traits, so hosts can plug in an HTTP client, a cache, or a fake.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{Product, Stock};
use crate::ids::ProductId;

/// Why a lookup failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No record for this product.
    #[error("No record for product {0}")]
    NotFound(ProductId),

    /// Network, server or decoding failure.
    #[error("Lookup failed: {0}")]
    Transport(String),
}

/// Source of product metadata.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch a product by its identifier.
    async fn product_by_id(&self, id: ProductId) -> Result<Product, LookupError>;
}

/// Source of stock levels.
#[async_trait]
pub trait StockClient: Send + Sync {
    /// Fetch the current stock level of a product.
    async fn stock_by_product_id(&self, id: ProductId) -> Result<Stock, LookupError>;
}

#[async_trait]
impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    async fn product_by_id(&self, id: ProductId) -> Result<Product, LookupError> {
        (**self).product_by_id(id).await
    }
}

#[async_trait]
impl<T: StockClient + ?Sized> StockClient for Arc<T> {
    async fn stock_by_product_id(&self, id: ProductId) -> Result<Stock, LookupError> {
        (**self).stock_by_product_id(id).await
    }
}
