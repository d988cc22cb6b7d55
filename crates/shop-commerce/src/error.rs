//! Commerce error types.

use thiserror::Error;

use crate::checkout::FieldErrors;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A checkout form failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl From<FieldErrors> for CommerceError {
    fn from(errors: FieldErrors) -> Self {
        CommerceError::Validation(errors)
    }
}
