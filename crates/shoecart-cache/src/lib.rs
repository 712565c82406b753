//! Type-safe key-value persistence for the shoecart client.
//!
//! Provides the local storage the cart snapshot lives in: a small
//! [`KeyValueStore`] trait with in-memory and on-disk backends, and a typed
//! [`Cache`] wrapper that handles JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use shoecart_cache::{Cache, FileStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Entry {
//!     id: u64,
//!     amount: i64,
//! }
//!
//! let cache = Cache::new(FileStore::open("/home/me/.local/share/shoecart")?);
//!
//! // Store a value
//! cache.set("@RocketShoes:cart", &vec![Entry { id: 1, amount: 2 }])?;
//!
//! // Retrieve a value
//! let entries: Option<Vec<Entry>> = cache.get("@RocketShoes:cart")?;
//!
//! // Delete a value
//! cache.delete("@RocketShoes:cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
