//! Card details captured at the payment step.
//!
//! Nothing here is charged or stored; the details only have to pass form
//! validation and are shown back masked on review.

use serde::Deserialize;
use std::fmt;

use crate::checkout::validation::{FieldErrors, Validate};

/// Card payment details as typed by the customer.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentMethod {
    pub card_number: String,
    pub name_on_card: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
    pub save_payment_method: bool,
}

impl PaymentMethod {
    /// Last four digits of the card number.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }

    /// Review line, e.g. `Card ending in 4242`.
    pub fn masked(&self) -> String {
        format!("Card ending in {}", self.last_four())
    }
}

impl fmt::Debug for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentMethod")
            .field("card", &self.masked())
            .field("name_on_card", &self.name_on_card)
            .field("expiry_date", &self.expiry_date)
            .field("save_payment_method", &self.save_payment_method)
            .finish_non_exhaustive()
    }
}

impl Validate for PaymentMethod {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.min_len("card_number", &self.card_number, 16, "Card number is required");
        errors.min_len("name_on_card", &self.name_on_card, 2, "Name on card is required");
        errors.min_len("expiry_date", &self.expiry_date, 5, "Expiry date is required");
        errors.min_len("cvv", &self.cvv, 3, "CVV is required");
        errors.into_result()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_card() -> PaymentMethod {
        PaymentMethod {
            card_number: "4242 4242 4242 4242".into(),
            name_on_card: "Jane Smith".into(),
            expiry_date: "12/28".into(),
            cvv: "123".into(),
            save_payment_method: false,
        }
    }

    #[test]
    fn test_valid_card_passes() {
        assert!(sample_card().validate().is_ok());
    }

    #[test]
    fn test_short_fields_fail() {
        let card = PaymentMethod {
            card_number: "4242".into(),
            cvv: "12".into(),
            ..sample_card()
        };
        let errors = card.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("card_number"), Some("Card number is required"));
        assert_eq!(errors.get("cvv"), Some("CVV is required"));
    }

    #[test]
    fn test_masked_card() {
        assert_eq!(sample_card().masked(), "Card ending in 4242");
        let short = PaymentMethod {
            card_number: "12".into(),
            ..sample_card()
        };
        assert_eq!(short.last_four(), "12");
    }

    #[test]
    fn test_debug_hides_card_number() {
        let debug = format!("{:?}", sample_card());
        assert!(!debug.contains("4242 4242"));
        assert!(!debug.contains("123"));
        assert!(debug.contains("Card ending in 4242"));
    }
}
