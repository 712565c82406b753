//! CLI command implementations.

pub mod cart;
pub mod products;

use clap::Args;
use shoecart_core::ProductId;

/// Arguments for commands acting on one product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product identifier.
    pub id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product identifier.
    pub id: ProductId,

    /// New amount (at least 1).
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}
