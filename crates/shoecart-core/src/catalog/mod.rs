//! Product catalog module.
//!
//! Contains product and stock types, the client traits the cart store looks
//! products up through, and an in-memory catalog.

mod client;
mod inventory;
mod memory;
mod product;

pub use client::{CatalogClient, LookupError, StockClient};
pub use inventory::Stock;
pub use memory::InMemoryCatalog;
pub use product::Product;
