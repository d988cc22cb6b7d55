//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shop_commerce::cart::CartState;
use shop_commerce::catalog::CatalogSource;
use shop_commerce::checkout::OrderSummary;
use shop_commerce::{CommerceError, ProductId};

use super::catalog::lookup;
use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx),
        Some(CartCommand::Add { id, quantity }) => add_item(&id, quantity, ctx).await,
        Some(CartCommand::Remove { id }) => remove_item(&id, ctx),
        Some(CartCommand::Set { id, quantity }) => set_quantity(&id, quantity, ctx),
        Some(CartCommand::Clear { yes }) => clear_cart(yes, ctx),
    }
}

fn show_cart(ctx: &Context) -> Result<()> {
    let state = ctx.cart_state()?;

    if ctx.output.is_json() {
        ctx.output.json(&state);
        return Ok(());
    }

    ctx.output.header("Shopping Cart");
    if state.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Browse products with `shop products`.");
        return Ok(());
    }

    let widths = [4, 28, 10, 4, 10];
    ctx.output.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    for line in state.lines() {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &truncate(&line.product.name, 28),
                &line.product.price.display(),
                &line.quantity.to_string(),
                &line.line_total().display(),
            ],
            &widths,
        );
    }

    let summary = OrderSummary::from_cart(&state, &ctx.config.pricing())?;
    ctx.output.line("");
    ctx.output.kv(
        &format!("Subtotal ({} items)", state.total_items()),
        &summary.subtotal.display(),
    );
    ctx.output.kv("Shipping", &summary.shipping.display());
    ctx.output.kv(
        &format!("Tax ({}%)", ctx.config.checkout.tax_percent),
        &summary.tax.display(),
    );
    ctx.output.kv("Total", &summary.total.display());
    ctx.output.line("");
    ctx.output.info("Proceed with `shop checkout`.");
    Ok(())
}

/// Add units of a product, never more than the stock not already in the cart.
async fn add_item(id: &str, quantity: u32, ctx: &Context) -> Result<()> {
    if quantity == 0 {
        bail!("Quantity must be at least 1");
    }

    let catalog = ctx.catalog();
    let product_id = ProductId::new(id);
    let Some(product) = lookup(ctx, "Loading product...", catalog.get_product(&product_id)).await
    else {
        return Err(CommerceError::ProductNotFound(id.to_string()).into());
    };

    if !product.is_in_stock() {
        bail!("{} is out of stock", product.name);
    }

    let mut cart = ctx.cart()?;
    let remaining = product.remaining_stock(cart.state().quantity_of(&product.id));
    if remaining == 0 {
        bail!(
            "All {} available units of {} are already in your cart",
            product.stock,
            product.name
        );
    }

    let quantity = if quantity > remaining {
        ctx.output.warn(&format!(
            "Only {} more of {} available; adding {}",
            remaining, product.name, remaining
        ));
        remaining
    } else {
        quantity
    };

    cart.add(product, quantity);
    report(ctx, cart.state());
    Ok(())
}

fn remove_item(id: &str, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    let product_id = ProductId::new(id);
    if cart.state().line(&product_id).is_none() {
        ctx.output.warn(&format!("Product {} is not in your cart", id));
    }

    cart.remove(&product_id);
    report(ctx, cart.state());
    Ok(())
}

/// Set a line's quantity, never above the product's stock.
fn set_quantity(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    let product_id = ProductId::new(id);
    let Some(line) = cart.state().line(&product_id) else {
        bail!("Product {} is not in your cart", id);
    };

    let stock = line.product.stock;
    let quantity = match clamp_to_stock(quantity, stock) {
        Some(clamped) => {
            ctx.output.warn(&format!(
                "Only {} of {} available; setting quantity to {}",
                stock, line.product.name, clamped
            ));
            clamped
        }
        None => quantity,
    };

    cart.set_quantity(&product_id, quantity);
    if quantity <= 0 {
        ctx.output.success("Item removed from cart.");
    } else {
        ctx.output.success(&format!("Quantity set to {}.", quantity));
    }
    report(ctx, cart.state());
    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    if cart.state().is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} items from your cart?",
                cart.state().total_items()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    cart.clear();
    report(ctx, cart.state());
    Ok(())
}

/// The stock ceiling for a requested quantity, if the request exceeds it.
fn clamp_to_stock(requested: i64, stock: u32) -> Option<i64> {
    let stock = i64::from(stock);
    (requested > stock).then_some(stock)
}

/// Print the cart after a change: totals, or the whole state in JSON mode.
fn report(ctx: &Context, state: &CartState) {
    if ctx.output.is_json() {
        ctx.output.json(state);
    } else {
        ctx.output.kv(
            "Cart",
            &format!("{} items, {}", state.total_items(), state.total_price()),
        );
    }
}
