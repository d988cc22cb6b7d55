//! Order totals shown on the summary panel.

use serde::{Deserialize, Serialize};

use crate::cart::CartState;
use crate::money::Money;
use crate::CommerceError;

/// How shipping and tax are charged on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Flat shipping fee in minor units of the cart currency.
    pub shipping_cents: i64,
    /// Tax as a whole percentage of the subtotal.
    pub tax_percent: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_cents: 1000,
            tax_percent: 8,
        }
    }
}

/// Order totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Price a cart. Tax is charged on the subtotal only and rounded to the
    /// nearest cent.
    pub fn from_cart(cart: &CartState, policy: &PricingPolicy) -> Result<Self, CommerceError> {
        let subtotal = cart.total_price();
        let shipping = Money::new(policy.shipping_cents, subtotal.currency);
        let tax = subtotal.percentage(policy.tax_percent);
        let total = subtotal
            .try_add(&shipping)
            .and_then(|m| m.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            item_count: cart.total_items(),
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{transition, CartAction};
    use crate::catalog::Product;

    fn cart() -> CartState {
        let lamp = Product::new("1", "Minimalist Desk Lamp", Money::usd(7999));
        let chair = Product::new("2", "Ergonomic Office Chair", Money::usd(24999));
        let state = transition(
            CartState::empty(),
            CartAction::Add {
                product: lamp,
                quantity: 1,
            },
        );
        transition(
            state,
            CartAction::Add {
                product: chair,
                quantity: 2,
            },
        )
    }

    #[test]
    fn test_default_policy_totals() {
        let summary = OrderSummary::from_cart(&cart(), &PricingPolicy::default()).unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal.display(), "$579.97");
        assert_eq!(summary.tax.display(), "$46.40");
        assert_eq!(summary.shipping.display(), "$10.00");
        assert_eq!(summary.total.display(), "$636.37");
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            shipping_cents: 0,
            tax_percent: 0,
        };
        let summary = OrderSummary::from_cart(&cart(), &policy).unwrap();
        assert_eq!(summary.total, summary.subtotal);
    }

    #[test]
    fn test_empty_cart_still_charges_shipping() {
        let summary = OrderSummary::from_cart(&CartState::empty(), &PricingPolicy::default()).unwrap();
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.total, Money::usd(1000));
    }
}
