//! Product listing filters.

use crate::catalog::{slugify, Product};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A listing filter. A product is listed when it matches every filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Category, by name or slug.
    Category(String),
    /// Inclusive price bounds. A bound in another currency never matches.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only featured products.
    Featured,
    /// Only in-stock products.
    InStock,
    /// Minimum star rating.
    MinRating(f32),
    /// Case-insensitive substring of name or description.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: impl AsRef<str>) -> Self {
        Filter::Category(slugify(category.as_ref()))
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(category) => product.in_category(category),
            Filter::PriceRange { min, max } => {
                let price = product.price;
                let above = min.map_or(true, |m| {
                    m.currency == price.currency && price.amount_cents >= m.amount_cents
                });
                let below = max.map_or(true, |m| {
                    m.currency == price.currency && price.amount_cents <= m.amount_cents
                });
                above && below
            }
            Filter::Featured => product.featured,
            Filter::InStock => product.is_in_stock(),
            Filter::MinRating(min) => product.rating >= *min,
            Filter::Text(query) => product.matches_text(query),
        }
    }
}

/// The storefront's price selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    /// Below $50.
    Under50,
    /// $50 to $100, both inclusive.
    From50To100,
    /// Above $100.
    Over100,
}

impl PriceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBucket::Under50 => "under50",
            PriceBucket::From50To100 => "50to100",
            PriceBucket::Over100 => "over100",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PriceBucket::Under50 => "Under $50",
            PriceBucket::From50To100 => "$50 - $100",
            PriceBucket::Over100 => "Over $100",
        }
    }

    /// The equivalent price range filter, in USD.
    pub fn to_filter(self) -> Filter {
        match self {
            PriceBucket::Under50 => Filter::price_range(None, Some(Money::usd(4999))),
            PriceBucket::From50To100 => {
                Filter::price_range(Some(Money::usd(5000)), Some(Money::usd(10000)))
            }
            PriceBucket::Over100 => Filter::price_range(Some(Money::usd(10001)), None),
        }
    }
}

impl From<PriceBucket> for Filter {
    fn from(bucket: PriceBucket) -> Self {
        bucket.to_filter()
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "under50" => Ok(PriceBucket::Under50),
            "50to100" => Ok(PriceBucket::From50To100),
            "over100" => Ok(PriceBucket::Over100),
            other => Err(format!(
                "unknown price range '{other}' (expected under50, 50to100 or over100)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn priced(cents: i64) -> Product {
        Product::new("p", "Thing", Money::usd(cents))
    }

    #[test]
    fn test_price_buckets_edges() {
        let under = PriceBucket::Under50.to_filter();
        assert!(under.matches(&priced(4999)));
        assert!(!under.matches(&priced(5000)));

        let mid = PriceBucket::From50To100.to_filter();
        assert!(mid.matches(&priced(5000)));
        assert!(mid.matches(&priced(10000)));
        assert!(!mid.matches(&priced(10001)));

        let over = PriceBucket::Over100.to_filter();
        assert!(over.matches(&priced(10001)));
        assert!(!over.matches(&priced(10000)));
    }

    #[test]
    fn test_price_range_ignores_other_currency() {
        let filter = Filter::price_range(Some(Money::new(0, Currency::EUR)), None);
        assert!(!filter.matches(&priced(100)));
    }

    #[test]
    fn test_category_filter_accepts_names() {
        let product = priced(100).with_category("home_decor");
        assert!(Filter::category("Home Decor").matches(&product));
        assert!(!Filter::category("Lighting").matches(&product));
    }

    #[test]
    fn test_stock_and_flags() {
        let product = priced(100).with_stock(0).with_rating(4.2);
        assert!(!Filter::InStock.matches(&product));
        assert!(!Filter::Featured.matches(&product));
        assert!(Filter::MinRating(4.0).matches(&product));
        assert!(!Filter::MinRating(4.5).matches(&product));
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!("50to100".parse::<PriceBucket>(), Ok(PriceBucket::From50To100));
        assert_eq!("Under50".parse::<PriceBucket>(), Ok(PriceBucket::Under50));
        assert!("cheap".parse::<PriceBucket>().is_err());
    }
}
