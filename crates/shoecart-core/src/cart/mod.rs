//! Shopping cart module.
//!
//! Contains the cart value type, its persistence, and the store that
//! mutates it.

mod cart;
mod persistence;
mod store;

pub use cart::{Cart, CartEntry};
pub use persistence::{default_cart_key, CartPersistence, KvCartPersistence, STORAGE_NAMESPACE};
pub use store::{CartSnapshot, CartStore};
