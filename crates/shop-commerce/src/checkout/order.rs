//! Placed-order confirmation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cart::CartLine;
use crate::checkout::{OrderSummary, ShippingAddress};
use crate::ids::OrderId;

/// What the customer sees once an order is placed.
///
/// Nothing is submitted anywhere; the confirmation is the only record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    /// Display-only confirmation number.
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    /// Cart lines as they were when the order was placed.
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    pub shipping_address: ShippingAddress,
    /// Masked card line, e.g. `Card ending in 4242`.
    pub payment: String,
}

impl OrderConfirmation {
    /// Customer-facing confirmation message.
    pub fn message(&self) -> String {
        format!(
            "Order #{} placed. A confirmation has been sent to {}.",
            self.order_id,
            self.shipping_address.email.trim()
        )
    }
}
