//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Number of minor units in one major unit (100 for USD).
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Shorthand for a USD amount in cents.
    ///
    /// ```
    /// use shop_commerce::money::Money;
    /// assert_eq!(Money::usd(7999).display(), "$79.99");
    /// ```
    pub const fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{}{}", self.currency.symbol(), self.display_amount_abs())
    }

    fn display_amount_abs(&self) -> String {
        let per_major = self.currency.minor_per_major().unsigned_abs();
        let abs = self.amount_cents.unsigned_abs();
        match self.currency.decimal_places() {
            0 => abs.to_string(),
            places => format!(
                "{}.{:0width$}",
                abs / per_major,
                abs % per_major,
                width = places as usize
            ),
        }
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to multiply by an integer factor, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Calculate a whole-number percentage of this amount, rounding half
    /// away from zero to the nearest minor unit.
    ///
    /// ```
    /// use shop_commerce::money::Money;
    /// // 8% of $579.97 is $46.3976
    /// assert_eq!(Money::usd(57997).percentage(8).amount_cents, 4640);
    /// ```
    pub fn percentage(&self, percent: u32) -> Money {
        let scaled = i128::from(self.amount_cents) * i128::from(percent);
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        Money::new(rounded as i64, self.currency)
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::usd(4999).display(), "$49.99");
        assert_eq!(Money::usd(5).display(), "$0.05");
        assert_eq!(Money::usd(-1050).display(), "-$10.50");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_try_add_rejects_currency_mismatch() {
        let usd = Money::usd(1000);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
        assert_eq!(usd.try_add(&usd).unwrap().amount_cents, 2000);
    }

    #[test]
    fn test_try_multiply_overflow() {
        assert!(Money::usd(i64::MAX).try_multiply(2).is_none());
        assert_eq!(Money::usd(24999).try_multiply(2).unwrap().amount_cents, 49998);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(Money::usd(10000).percentage(10).amount_cents, 1000);
        // 8% of $0.06 = 0.48 cents -> 0
        assert_eq!(Money::usd(6).percentage(8).amount_cents, 0);
        // 8% of $0.07 = 0.56 cents -> 1
        assert_eq!(Money::usd(7).percentage(8).amount_cents, 1);
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::usd(7999), Money::usd(49998)];
        let total = Money::try_sum(values.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 57997);

        let mixed = [Money::usd(100), Money::new(100, Currency::EUR)];
        assert!(Money::try_sum(mixed.iter(), Currency::USD).is_none());
        let huge = [Money::usd(i64::MAX), Money::usd(1)];
        assert!(Money::try_sum(huge.iter(), Currency::USD).is_none());
    }
}
