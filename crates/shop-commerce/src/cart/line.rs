//! Cart line type.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product/quantity pairing in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always at least 1.
    pub quantity: u32,
    /// Product snapshot taken when the line was created.
    pub product: Product,
}

impl CartLine {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity,
            product,
        }
    }

    /// Unit price times quantity, or `None` on overflow.
    pub fn checked_total(&self) -> Option<Money> {
        self.product.price.try_multiply(i64::from(self.quantity))
    }

    /// Unit price times quantity.
    ///
    /// Lines held by a [`CartState`](crate::cart::CartState) always have a
    /// representable total; a detached line that overflows saturates.
    pub fn line_total(&self) -> Money {
        self.checked_total().unwrap_or_else(|| {
            let unit = self.product.price;
            Money::new(
                unit.amount_cents.saturating_mul(i64::from(self.quantity)),
                unit.currency,
            )
        })
    }
}
