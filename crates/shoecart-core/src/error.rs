//! Cart error types and the user-facing message policy.

use std::fmt;

use thiserror::Error;

use crate::catalog::LookupError;
use crate::ids::ProductId;

/// Message shown when a request exceeds available stock.
pub const STOCK_SHORTAGE_MESSAGE: &str = "Quantidade solicitada fora de estoque";

/// Errors that can occur in cart operations.
///
/// Each variant is a distinct kind. Only [`CartError::StockShortage`] has its
/// own user-facing message; every other kind is shown to the user as the
/// generic message of the operation that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Requested amount exceeds available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockShortage {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The catalog has no such product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    EntryNotFound(ProductId),

    /// The product is already in the cart.
    #[error("Product already in cart: {0}")]
    DuplicateEntry(ProductId),

    /// Amount is below 1.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Catalog or stock lookup failed for infrastructure reasons.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The cart snapshot could not be written.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CartError {
    /// Whether this failure is a stock shortage.
    pub fn is_stock_shortage(&self) -> bool {
        matches!(self, CartError::StockShortage { .. })
    }

    /// Message to show the user when `operation` fails with this error.
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        match self {
            CartError::StockShortage { .. } => STOCK_SHORTAGE_MESSAGE,
            _ => operation.failure_message(),
        }
    }
}

impl From<LookupError> for CartError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound(id) => CartError::ProductNotFound(id),
            LookupError::Transport(reason) => CartError::TransportFailure(reason),
        }
    }
}

impl From<shoecart_cache::CacheError> for CartError {
    fn from(e: shoecart_cache::CacheError) -> Self {
        CartError::Persistence(e.to_string())
    }
}

/// The public cart operations, used to pick a failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
    Clear,
}

impl CartOperation {
    /// Generic message shown when this operation fails for any reason other
    /// than a stock shortage.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "Erro na adição do produto",
            CartOperation::Remove => "Erro na remoção do produto",
            CartOperation::UpdateAmount => "Erro na alteração de quantidade do produto",
            CartOperation::Clear => "Erro ao esvaziar o carrinho",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::UpdateAmount => "update_amount",
            CartOperation::Clear => "clear",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
