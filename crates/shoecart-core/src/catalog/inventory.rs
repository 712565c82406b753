//! Stock level types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available quantity of a product, as reported by the stock API at query time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product this stock level belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl Stock {
    /// Create a new stock level.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if a cart amount of `requested` units can be held.
    pub fn can_fulfill(&self, requested: i64) -> bool {
        requested <= self.amount
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.amount <= 0
    }
}
