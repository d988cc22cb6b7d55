//! Shipping address captured at the first checkout step.

use serde::{Deserialize, Serialize};

use crate::checkout::validation::{is_valid_email, FieldErrors, Validate};

/// Country preselected on the shipping form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Where the order ships, and how to reach the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// Apartment, suite, etc.
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    /// Customer asked to remember this address.
    pub save_address: bool,
}

impl ShippingAddress {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address.trim().to_string()];
        if let Some(apartment) = self.apartment.as_deref().map(str::trim) {
            if !apartment.is_empty() {
                parts.push(apartment.to_string());
            }
        }
        parts.push(self.city.trim().to_string());
        parts.push(format!("{} {}", self.state.trim(), self.zip_code.trim()));
        parts.push(self.country.trim().to_string());
        parts.join(", ")
    }

    /// Format as multi-line, the way the review step shows it.
    pub fn multi_line(&self) -> String {
        let mut street = self.address.trim().to_string();
        if let Some(apartment) = self.apartment.as_deref().map(str::trim) {
            if !apartment.is_empty() {
                street.push_str(", ");
                street.push_str(apartment);
            }
        }
        [
            self.full_name(),
            street,
            format!(
                "{}, {} {}",
                self.city.trim(),
                self.state.trim(),
                self.zip_code.trim()
            ),
            self.country.trim().to_string(),
        ]
        .join("\n")
    }
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            apartment: None,
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            phone: String::new(),
            email: String::new(),
            save_address: false,
        }
    }
}

impl Validate for ShippingAddress {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.min_len("first_name", &self.first_name, 2, "First name is required");
        errors.min_len("last_name", &self.last_name, 2, "Last name is required");
        errors.min_len("address", &self.address, 5, "Address is required");
        errors.min_len("city", &self.city, 2, "City is required");
        errors.min_len("state", &self.state, 2, "State is required");
        errors.min_len("zip_code", &self.zip_code, 5, "ZIP code is required");
        errors.min_len("country", &self.country, 2, "Country is required");
        errors.min_len("phone", &self.phone, 10, "Phone number is required");
        if !is_valid_email(&self.email) {
            errors.push("email", "Invalid email address");
        }
        errors.into_result()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            address: "456 Oak Ave".into(),
            apartment: Some("Apt 2".into()),
            city: "Los Angeles".into(),
            state: "CA".into(),
            zip_code: "90001".into(),
            phone: "3105550123".into(),
            email: "jane@example.com".into(),
            ..ShippingAddress::default()
        }
    }

    #[test]
    fn test_default_country() {
        assert_eq!(ShippingAddress::default().country, "United States");
    }

    #[test]
    fn test_valid_address_passes() {
        assert!(sample_address().validate().is_ok());
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let address = ShippingAddress {
            first_name: "J".into(),
            zip_code: "9000".into(),
            email: "jane@".into(),
            ..sample_address()
        };
        let errors = address.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("first_name"), Some("First name is required"));
        assert_eq!(errors.get("zip_code"), Some("ZIP code is required"));
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }

    #[test]
    fn test_apartment_is_optional() {
        let address = ShippingAddress {
            apartment: None,
            ..sample_address()
        };
        assert!(address.validate().is_ok());
        assert_eq!(
            address.one_line(),
            "456 Oak Ave, Los Angeles, CA 90001, United States"
        );
    }

    #[test]
    fn test_address_formatting() {
        let address = sample_address();
        assert_eq!(address.full_name(), "Jane Smith");
        assert_eq!(
            address.multi_line(),
            "Jane Smith\n456 Oak Ave, Apt 2\nLos Angeles, CA 90001\nUnited States"
        );
    }

    #[test]
    fn test_partial_record_keeps_defaults() {
        let address: ShippingAddress = serde_json::from_str(r#"{"first_name": "Jane"}"#).unwrap();
        assert_eq!(address.first_name, "Jane");
        assert_eq!(address.country, DEFAULT_COUNTRY);
        assert!(!address.save_address);
    }
}
