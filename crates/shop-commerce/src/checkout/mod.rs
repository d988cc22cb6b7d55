//! Checkout module.
//!
//! Contains the checkout flow, its forms and their validation, order totals,
//! and the confirmation produced when an order is placed.

mod address;
mod flow;
mod order;
mod payment;
mod summary;
mod validation;

pub use address::{ShippingAddress, DEFAULT_COUNTRY};
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::OrderConfirmation;
pub use payment::PaymentMethod;
pub use summary::{OrderSummary, PricingPolicy};
pub use validation::{is_valid_email, FieldError, FieldErrors, Validate};
