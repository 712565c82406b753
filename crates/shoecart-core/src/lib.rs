//! Cart state machine for the shoecart storefront client.
//!
//! This crate provides the client-side shopping cart:
//!
//! - **Cart**: ordered entries with amounts, serialized as a flat JSON array
//! - **Store**: add/remove/update operations checked against live stock,
//!   saved before they are published
//! - **Catalog**: product and stock types and the client traits used to look
//!   them up
//! - **Notifications**: user-facing failure messages
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shoecart_core::prelude::*;
//! use shoecart_cache::FileStore;
//!
//! let api = Arc::new(api_client);
//! let store = CartStore::new(
//!     api.clone(),
//!     api,
//!     Box::new(KvCartPersistence::new(FileStore::open(data_dir)?)),
//!     Arc::new(TracingNotifier),
//! );
//!
//! store.add_product(ProductId::new(42)).await.ok();
//! for entry in store.cart().entries() {
//!     println!("{} x{}", entry.product.title, entry.amount);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notify;

pub mod cart;
pub mod catalog;

pub use error::{CartError, CartOperation, STOCK_SHORTAGE_MESSAGE};
pub use ids::ProductId;
pub use money::format_price;
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, CartOperation};
    pub use crate::ids::ProductId;
    pub use crate::money::format_price;
    pub use crate::notify::{Notifier, TracingNotifier};

    // Cart
    pub use crate::cart::{
        Cart, CartEntry, CartPersistence, CartSnapshot, CartStore, KvCartPersistence,
    };

    // Catalog
    pub use crate::catalog::{CatalogClient, LookupError, Product, Stock, StockClient};
}
