//! Cart and cart entry types.

use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One product in the cart with the number of units selected.
///
/// Serialized flat, as the product fields plus `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Product metadata captured when the entry was created.
    #[serde(flatten)]
    pub product: Product,
    /// Units selected. Always at least 1.
    pub amount: i64,
}

impl CartEntry {
    /// Create a new entry.
    pub fn new(product: Product, amount: i64) -> Result<Self, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }
        Ok(Self { product, amount })
    }

    /// Product identifier.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount, for display.
    pub fn line_total(&self) -> f64 {
        self.product.price * self.amount as f64
    }
}

/// The products a client has selected, in the order they were first added.
///
/// No two entries share a product id. Serialized as a plain JSON array of
/// entries; deserializing re-validates every entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(into = "Vec<CartEntry>", try_from = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from entries, rejecting duplicate ids and amounts below 1.
    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for entry in entries {
            cart.push(entry.product, entry.amount)?;
        }
        Ok(cart)
    }

    /// Append a new entry.
    ///
    /// Returns an error if:
    /// - amount is below 1
    /// - the product is already in the cart
    pub fn push(&mut self, product: Product, amount: i64) -> Result<(), CartError> {
        if self.contains(product.id) {
            return Err(CartError::DuplicateEntry(product.id));
        }
        self.entries.push(CartEntry::new(product, amount)?);
        Ok(())
    }

    /// Replace the amount of an existing entry. Order is unchanged.
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(CartError::EntryNotFound(id))?;
        entry.amount = amount;
        Ok(())
    }

    /// Remove an entry, keeping the order of the rest.
    pub fn remove(&mut self, id: ProductId) -> Result<CartEntry, CartError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or(CartError::EntryNotFound(id))?;
        Ok(self.entries.remove(index))
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount of a product in the cart, 0 if absent.
    pub fn amount_of(&self, id: ProductId) -> i64 {
        self.get(id).map(|e| e.amount).unwrap_or(0)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Amount per product, for "N in cart" badges on a product grid.
    pub fn amounts_by_product(&self) -> BTreeMap<ProductId, i64> {
        self.entries.iter().map(|e| (e.id(), e.amount)).collect()
    }
}

impl TryFrom<Vec<CartEntry>> for Cart {
    type Error = CartError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
