//! Cart commands.

use anyhow::Result;
use shoecart_core::cart::Cart;
use shoecart_core::format_price;
use shoecart_core::ProductId;

use super::{ProductArgs, UpdateArgs};
use crate::context::Context;

const WIDTHS: [usize; 5] = [6, 32, 6, 14, 14];

/// Show the cart.
pub async fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    print_cart(&store.cart(), ctx);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.add_product(args.id).await?;

    let cart = store.cart();
    report_entry(&cart, args.id, ctx);
    Ok(())
}

/// Remove a product from the cart.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.remove_product(args.id).await?;

    ctx.output.success(&format!("Removed product {}", args.id));
    if ctx.output.is_json() {
        ctx.output.json(&*store.cart());
    }
    Ok(())
}

/// Set the amount of a product already in the cart.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.update_product_amount(args.id, args.amount).await?;

    let cart = store.cart();
    report_entry(&cart, args.id, ctx);
    Ok(())
}

/// Empty the cart.
pub async fn clear(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.clear().await?;

    ctx.output.success("Cart cleared");
    if ctx.output.is_json() {
        ctx.output.json(&*store.cart());
    }
    Ok(())
}

fn report_entry(cart: &Cart, id: ProductId, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }
    if let Some(entry) = cart.get(id) {
        ctx.output.success(&format!(
            "{} x{} ({})",
            entry.product.title,
            entry.amount,
            format_price(entry.line_total())
        ));
    }
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    ctx.output.header("Cart");
    ctx.output
        .table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &WIDTHS);
    for entry in cart {
        let id = entry.id().to_string();
        let amount = entry.amount.to_string();
        let price = format_price(entry.product.price);
        let subtotal = format_price(entry.line_total());
        ctx.output.table_row(
            &[&id, &entry.product.title, &amount, &price, &subtotal],
            &WIDTHS,
        );
    }

    let total: f64 = cart.entries().iter().map(|e| e.line_total()).sum();
    println!();
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &format_price(total));
}
