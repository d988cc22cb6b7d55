//! Checkout command.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input, Password, Select};
use serde::Deserialize;
use shop_commerce::cart::CartState;
use shop_commerce::checkout::{
    CheckoutFlow, CheckoutStep, FieldErrors, OrderConfirmation, OrderSummary, PaymentMethod,
    ShippingAddress,
};
use shop_commerce::CommerceError;

use super::CheckoutArgs;
use crate::context::{resolve_path, Context};

/// Checkout details supplied up front instead of through prompts.
#[derive(Debug, Deserialize)]
pub struct CheckoutDetails {
    pub shipping: ShippingAddress,
    pub payment: PaymentMethod,
}

impl CheckoutDetails {
    /// Load details from a TOML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read checkout details: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON details: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML details: {}", path.display()))
        }
    }
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    if cart.state().is_empty() {
        bail!("Your cart is empty. Add products with `shop cart add <id>`.");
    }

    let mut flow = CheckoutFlow::with_pricing(ctx.config.pricing());

    match args.details {
        Some(ref path) => {
            let details = CheckoutDetails::load(&resolve_path(&ctx.cwd, path))?;
            submit_details(ctx, &mut flow, details)?;
        }
        None => {
            if ctx.output.is_json() {
                bail!("--json needs --details; prompts are not available in JSON mode");
            }
            ctx.output.header("Checkout");
            print_summary(ctx, &flow.summary(cart.state())?, cart.state());
            prompt_shipping(ctx, &mut flow, ShippingAddress::default())?;
            prompt_payment(ctx, &mut flow, PaymentMethod::default())?;
        }
    }

    if !review(ctx, &mut flow, cart.state(), args.yes)? {
        ctx.output.warn("Checkout cancelled; your cart is unchanged");
        return Ok(());
    }

    let confirmation = flow.place_order(&mut cart)?;
    print_confirmation(ctx, &confirmation);
    Ok(())
}

fn submit_details(ctx: &Context, flow: &mut CheckoutFlow, details: CheckoutDetails) -> Result<()> {
    if let Err(e) = flow.submit_shipping(details.shipping) {
        return Err(report_invalid(ctx, "shipping", e));
    }
    if let Err(e) = flow.submit_payment(details.payment) {
        return Err(report_invalid(ctx, "payment", e));
    }
    Ok(())
}

fn report_invalid(ctx: &Context, form: &str, error: CommerceError) -> anyhow::Error {
    if let CommerceError::Validation(ref errors) = error {
        print_field_errors(ctx, errors);
    }
    anyhow::Error::new(error).context(format!("Invalid {form} details"))
}

fn print_field_errors(ctx: &Context, errors: &FieldErrors) {
    for error in errors {
        ctx.output.warn(&format!("{}: {}", error.field, error.message));
    }
}

fn prompt_shipping(ctx: &Context, flow: &mut CheckoutFlow, mut draft: ShippingAddress) -> Result<()> {
    loop {
        ctx.output.step(CheckoutStep::Shipping.number(), 4, "Shipping Information");
        draft = ShippingAddress {
            first_name: ask("First name", &draft.first_name)?,
            last_name: ask("Last name", &draft.last_name)?,
            address: ask("Address", &draft.address)?,
            apartment: Some(ask(
                "Apartment, suite, etc. (optional)",
                draft.apartment.as_deref().unwrap_or_default(),
            )?)
            .filter(|a| !a.trim().is_empty()),
            city: ask("City", &draft.city)?,
            state: ask("State", &draft.state)?,
            zip_code: ask("ZIP code", &draft.zip_code)?,
            country: ask("Country", &draft.country)?,
            phone: ask("Phone", &draft.phone)?,
            email: ask("Email", &draft.email)?,
            save_address: Confirm::new()
                .with_prompt("Save this address for next time?")
                .default(draft.save_address)
                .interact()?,
        };

        match flow.submit_shipping(draft.clone()) {
            Ok(_) => return Ok(()),
            Err(CommerceError::Validation(errors)) => {
                print_field_errors(ctx, &errors);
                ctx.output.info("Please correct the highlighted fields.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_payment(ctx: &Context, flow: &mut CheckoutFlow, mut draft: PaymentMethod) -> Result<()> {
    loop {
        ctx.output.step(CheckoutStep::Payment.number(), 4, "Payment Method");
        draft = PaymentMethod {
            card_number: ask("Card number", &draft.card_number)?,
            name_on_card: ask("Name on card", &draft.name_on_card)?,
            expiry_date: ask("Expiry date (MM/YY)", &draft.expiry_date)?,
            cvv: Password::new().with_prompt("CVV").allow_empty_password(true).interact()?,
            save_payment_method: Confirm::new()
                .with_prompt("Save this card for future purchases?")
                .default(draft.save_payment_method)
                .interact()?,
        };

        match flow.submit_payment(draft.clone()) {
            Ok(_) => return Ok(()),
            Err(CommerceError::Validation(errors)) => {
                print_field_errors(ctx, &errors);
                ctx.output.info("Please correct the highlighted fields.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn ask(label: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

/// Show the review step. Returns `false` if the customer backs out.
fn review(ctx: &Context, flow: &mut CheckoutFlow, cart: &CartState, yes: bool) -> Result<bool> {
    loop {
        let summary = flow.summary(cart)?;
        if !ctx.output.is_json() {
            ctx.output.step(CheckoutStep::Review.number(), 4, "Review Your Order");
            if let Some(address) = flow.shipping_address() {
                ctx.output.kv("Ship to", "");
                for line in address.multi_line().lines() {
                    ctx.output.line(&format!("    {line}"));
                }
                ctx.output.kv("Contact", &format!("{} / {}", address.email, address.phone));
            }
            if let Some(payment) = flow.payment() {
                ctx.output.kv("Payment", &payment.masked());
            }
            print_summary(ctx, &summary, cart);
        }

        if yes || ctx.output.is_json() {
            return Ok(true);
        }

        let choice = Select::new()
            .with_prompt("Ready to place your order?")
            .items(&["Place order", "Edit payment", "Edit shipping", "Cancel"])
            .default(0)
            .interact()?;

        match choice {
            0 => return Ok(true),
            1 => {
                let draft = flow.payment().cloned().unwrap_or_default();
                flow.back()?;
                prompt_payment(ctx, flow, draft)?;
            }
            2 => {
                let shipping = flow.shipping_address().cloned().unwrap_or_default();
                let payment = flow.payment().cloned().unwrap_or_default();
                flow.back()?;
                flow.back()?;
                prompt_shipping(ctx, flow, shipping)?;
                prompt_payment(ctx, flow, payment)?;
            }
            _ => return Ok(false),
        }
    }
}

fn print_summary(ctx: &Context, summary: &OrderSummary, cart: &CartState) {
    ctx.output.line("");
    ctx.output.line("  Order Summary");
    for line in cart.lines() {
        ctx.output.table_row(
            &[
                &format!("{} x {}", line.quantity, line.product.name),
                &line.line_total().display(),
            ],
            &[36, 0],
        );
    }
    ctx.output.kv(
        &format!("Subtotal ({} items)", summary.item_count),
        &summary.subtotal.display(),
    );
    ctx.output.kv("Shipping", &summary.shipping.display());
    ctx.output.kv("Tax", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
    ctx.output.line("");
}

fn print_confirmation(ctx: &Context, confirmation: &OrderConfirmation) {
    if ctx.output.is_json() {
        ctx.output.json(confirmation);
        return;
    }

    ctx.output.step(CheckoutStep::Confirmation.number(), 4, "Order Confirmation");
    ctx.output.success("Thank you for your order!");
    ctx.output.kv("Order", &format!("#{}", confirmation.order_id));
    ctx.output.kv(
        "Placed",
        &confirmation
            .placed_at
            .with_timezone(&chrono::Local)
            .format("%B %-d, %Y %H:%M")
            .to_string(),
    );
    ctx.output.kv("Total", &confirmation.summary.total.display());
    ctx.output.info(&confirmation.message());
}
