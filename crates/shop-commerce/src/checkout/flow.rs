//! Checkout flow state machine.
//!
//! `Shipping -> Payment -> Review -> Confirmation`. Each forward move is
//! gated on its form validating; placing the order is the only step that
//! touches the cart.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shop_storage::Storage;

use crate::cart::{CartState, CartStore, Notifier};
use crate::checkout::{
    OrderConfirmation, OrderSummary, PaymentMethod, PricingPolicy, ShippingAddress, Validate,
};
use crate::ids::OrderId;
use crate::CommerceError;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Shipping address and contact details.
    #[default]
    Shipping,
    /// Card details.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed.
    Confirmation,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Confirmation => "Confirmation",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Confirmation => 4,
        }
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping_address: Option<ShippingAddress>,
    payment: Option<PaymentMethod>,
    pricing: PricingPolicy,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutFlow {
    /// Start a checkout at the shipping step with the default pricing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a checkout with custom shipping and tax.
    pub fn with_pricing(pricing: PricingPolicy) -> Self {
        Self {
            pricing,
            ..Self::default()
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Last accepted shipping address.
    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    /// Last accepted payment details.
    pub fn payment(&self) -> Option<&PaymentMethod> {
        self.payment.as_ref()
    }

    /// The placed order, once the flow reaches confirmation.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Confirmation
    }

    /// Accept the shipping form and move to payment.
    ///
    /// On validation failure the step does not change.
    pub fn submit_shipping(&mut self, address: ShippingAddress) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Payment)?;
        address.validate()?;

        tracing::debug!(email = %address.email.trim(), "shipping details accepted");
        self.shipping_address = Some(address);
        self.step = CheckoutStep::Payment;
        Ok(self.step)
    }

    /// Accept the payment form and move to review.
    pub fn submit_payment(&mut self, payment: PaymentMethod) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Review)?;
        payment.validate()?;

        tracing::debug!(card = %payment.masked(), "payment details accepted");
        self.payment = Some(payment);
        self.step = CheckoutStep::Review;
        Ok(self.step)
    }

    /// Go back to the previous form. Accepted details are kept.
    pub fn back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Shipping | CheckoutStep::Confirmation => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "back".to_string(),
                })
            }
        };

        self.step = prev;
        Ok(prev)
    }

    /// Order totals for `cart` under this checkout's pricing.
    pub fn summary(&self, cart: &CartState) -> Result<OrderSummary, CommerceError> {
        OrderSummary::from_cart(cart, &self.pricing)
    }

    /// Place the order: snapshot the cart, clear it, and confirm.
    ///
    /// Only valid from review with a non-empty cart. The cart is cleared
    /// exactly once, through the store's `clear` intent.
    pub fn place_order<S, N>(
        &mut self,
        cart: &mut CartStore<S, N>,
    ) -> Result<OrderConfirmation, CommerceError>
    where
        S: Storage,
        N: Notifier,
    {
        self.expect_step(CheckoutStep::Review, CheckoutStep::Confirmation)?;
        if cart.state().is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let (Some(shipping_address), Some(payment)) = (&self.shipping_address, &self.payment) else {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Confirmation.as_str().to_string(),
            });
        };

        let summary = self.summary(cart.state())?;
        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            placed_at: Utc::now(),
            lines: cart.state().lines().to_vec(),
            summary,
            shipping_address: shipping_address.clone(),
            payment: payment.masked(),
        };

        cart.clear();
        self.step = CheckoutStep::Confirmation;
        tracing::info!(
            order_id = %confirmation.order_id,
            items = confirmation.summary.item_count,
            total = %confirmation.summary.total,
            "order placed"
        );
        self.confirmation = Some(confirmation.clone());

        Ok(confirmation)
    }

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Notification;
    use crate::catalog::Product;
    use crate::checkout::address::tests::sample_address;
    use crate::checkout::payment::tests::sample_card;
    use crate::money::Money;
    use shop_storage::{MemoryStorage, StorageExt};
    use std::cell::RefCell;

    fn filled_store() -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(Product::new("1", "Minimalist Desk Lamp", Money::usd(7999)), 1);
        store.add(Product::new("2", "Ergonomic Office Chair", Money::usd(24999)), 2);
        store
    }

    fn at_review() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(sample_address()).unwrap();
        flow.submit_payment(sample_card()).unwrap();
        flow
    }

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert_eq!(flow.step().number(), 1);
        assert!(flow.shipping_address().is_none());
    }

    #[test]
    fn test_checkout_advance() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.submit_shipping(sample_address()).unwrap(), CheckoutStep::Payment);
        assert_eq!(flow.submit_payment(sample_card()).unwrap(), CheckoutStep::Review);
        assert_eq!(flow.payment().unwrap().masked(), "Card ending in 4242");
    }

    #[test]
    fn test_invalid_form_keeps_step() {
        let mut flow = CheckoutFlow::new();
        let address = ShippingAddress {
            phone: "555".into(),
            ..sample_address()
        };
        match flow.submit_shipping(address) {
            Err(CommerceError::Validation(errors)) => {
                assert_eq!(errors.get("phone"), Some("Phone number is required"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(flow.shipping_address().is_none());
    }

    #[test]
    fn test_payment_before_shipping_is_rejected() {
        let mut flow = CheckoutFlow::new();
        assert!(matches!(
            flow.submit_payment(sample_card()),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
    }

    #[test]
    fn test_checkout_go_back() {
        let mut flow = at_review();
        assert_eq!(flow.back().unwrap(), CheckoutStep::Payment);
        assert_eq!(flow.back().unwrap(), CheckoutStep::Shipping);
        assert!(flow.back().is_err());
        // Accepted details survive going back.
        assert!(flow.shipping_address().is_some());
        assert!(flow.payment().is_some());
    }

    #[test]
    fn test_place_order_clears_cart_once() {
        let cleared = RefCell::new(0);
        let storage = MemoryStorage::new();
        let mut store = CartStore::with_notifier(storage.clone(), |n: &Notification| {
            if *n == Notification::Cleared {
                *cleared.borrow_mut() += 1;
            }
        });
        store.add(Product::new("1", "Minimalist Desk Lamp", Money::usd(7999)), 1);
        store.add(Product::new("2", "Ergonomic Office Chair", Money::usd(24999)), 2);

        let mut flow = at_review();
        let confirmation = flow.place_order(&mut store).unwrap();

        assert_eq!(confirmation.summary.total.display(), "$636.37");
        assert_eq!(confirmation.lines.len(), 2);
        assert_eq!(confirmation.payment, "Card ending in 4242");
        assert_eq!(confirmation.order_id.as_str().len(), 8);
        assert!(store.state().is_empty());
        let saved: CartState = storage.get("shop_cart").unwrap().unwrap();
        assert!(saved.is_empty());
        assert_eq!(flow.step(), CheckoutStep::Confirmation);
        assert_eq!(flow.confirmation(), Some(&confirmation));
        drop(store);
        assert_eq!(cleared.into_inner(), 1);
    }

    #[test]
    fn test_place_order_requires_review() {
        let mut store = filled_store();
        let mut flow = CheckoutFlow::new();
        assert!(flow.place_order(&mut store).is_err());
        assert_eq!(store.state().total_items(), 3);
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut flow = at_review();
        assert!(matches!(flow.place_order(&mut store), Err(CommerceError::EmptyCart)));
        assert_eq!(flow.step(), CheckoutStep::Review);
    }

    #[test]
    fn test_order_cannot_be_placed_twice() {
        let mut store = filled_store();
        let mut flow = at_review();
        flow.place_order(&mut store).unwrap();
        assert!(flow.place_order(&mut store).is_err());
        assert!(flow.back().is_err());
    }

    #[test]
    fn test_summary_uses_pricing_policy() {
        let store = filled_store();
        let flow = CheckoutFlow::with_pricing(PricingPolicy {
            shipping_cents: 500,
            tax_percent: 10,
        });
        let summary = flow.summary(store.state()).unwrap();
        assert_eq!(summary.shipping, Money::usd(500));
        assert_eq!(summary.tax, Money::usd(5800));
        assert_eq!(summary.total, Money::usd(57997 + 500 + 5800));
    }
}
