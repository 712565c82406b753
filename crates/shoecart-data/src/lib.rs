//! Storefront API access for the shoecart client.
//!
//! [`ApiClient`] talks to the storefront's JSON REST API and implements the
//! catalog and stock lookups the cart store depends on:
//!
//! - `GET {base}/products/{id}`: product metadata
//! - `GET {base}/stock/{id}`: current stock level
//! - `GET {base}/products`: full catalog listing
//!
//! Every request runs under a [`FetchPolicy`]: a per-request timeout plus a
//! [`RetryPolicy`] for transient failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use shoecart_data::{ApiClient, FetchPolicy, RetryPolicy};
//!
//! let api = ApiClient::with_policy(
//!     "http://localhost:3333",
//!     FetchPolicy::new(Duration::from_secs(2), RetryPolicy::new(2)),
//! )?;
//! let products = api.list_products().await?;
//! ```

mod client;
mod error;
mod retry;

pub use client::{ApiClient, FetchPolicy, DEFAULT_TIMEOUT};
pub use error::FetchError;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, FetchError, FetchPolicy, RetryPolicy};
}
