//! Catalog listing.

use anyhow::{Context as _, Result};
use shoecart_core::format_price;

use crate::context::Context;

const WIDTHS: [usize; 4] = [6, 32, 14, 8];

/// List the catalog with how many of each product are in the cart.
pub async fn run(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let products = api
        .list_products()
        .await
        .with_context(|| format!("Failed to load products from {}", api.base_url()))?;
    ctx.output
        .debug(&format!("{} products from {}", products.len(), api.base_url()));

    let in_cart = ctx.open_store()?.cart().amounts_by_product();

    if ctx.output.is_json() {
        let rows: Vec<_> = products
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "title": p.title,
                    "price": p.price,
                    "priceFormatted": p.price_formatted(),
                    "image": p.image,
                    "inCart": in_cart.get(&p.id).copied().unwrap_or(0),
                })
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.warn("The catalog is empty");
        return Ok(());
    }

    ctx.output.header("Products");
    ctx.output.table_row(&["ID", "PRODUCT", "PRICE", "IN CART"], &WIDTHS);
    for product in &products {
        let id = product.id.to_string();
        let price = product.price_formatted();
        let amount = in_cart
            .get(&product.id)
            .map(|n| n.to_string())
            .unwrap_or_default();
        ctx.output
            .table_row(&[&id, &product.title, &price, &amount], &WIDTHS);
    }

    Ok(())
}
