//! Product types.

use crate::catalog::category::slugify;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// A product in the catalog.
///
/// Products are immutable once loaded from a catalog source. Cart lines keep
/// their own copy, so later catalog changes never rewrite a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Average rating, 0 to 5.
    pub rating: f32,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category slug (e.g. "home_decor").
    pub category: String,
    /// Shown on the landing page.
    #[serde(default)]
    pub featured: bool,
    /// Units available for purchase.
    pub stock: u32,
}

impl Product {
    /// Create a product with the required fields; everything else empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            rating: 0.0,
            image: String::new(),
            images: Vec::new(),
            category: String::new(),
            featured: false,
            stock: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = slugify(category.as_ref());
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the rating, clamped into `0..=5`.
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating.clamp(0.0, MAX_RATING);
        self
    }

    /// Set the gallery; the first image becomes the primary one.
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        if let Some(first) = self.images.first() {
            self.image = first.clone();
        }
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Check if at least one unit can be bought.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Human-readable availability, e.g. "In Stock (15 available)".
    pub fn stock_status(&self) -> String {
        if self.is_in_stock() {
            format!("In Stock ({} available)", self.stock)
        } else {
            "Out of Stock".to_string()
        }
    }

    /// Case-insensitive category match. Accepts a slug or a display name.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(&slugify(category))
    }

    /// Case-insensitive substring match against name and description.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Units a customer may still add when `in_cart` are already in the cart.
    pub fn remaining_stock(&self, in_cart: u32) -> u32 {
        self.stock.saturating_sub(in_cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Product {
        Product::new("1", "Minimalist Desk Lamp", Money::usd(7999))
            .with_description("A sleek, adjustable desk lamp with touch controls.")
            .with_category("Lighting")
            .with_stock(15)
    }

    #[test]
    fn test_builder_normalizes_category() {
        let p = Product::new("6", "Wall Clock", Money::usd(4999)).with_category("Home Decor");
        assert_eq!(p.category, "home_decor");
        assert!(p.in_category("home decor"));
        assert!(p.in_category("HOME_DECOR"));
        assert!(!p.in_category("office"));
    }

    #[test]
    fn test_matches_text_is_case_insensitive() {
        let p = lamp();
        assert!(p.matches_text("DESK"));
        assert!(p.matches_text("touch controls"));
        assert!(!p.matches_text("chair"));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(lamp().stock_status(), "In Stock (15 available)");
        assert_eq!(lamp().with_stock(0).stock_status(), "Out of Stock");
    }

    #[test]
    fn test_rating_is_clamped() {
        assert_eq!(lamp().with_rating(7.5).rating, MAX_RATING);
        assert_eq!(lamp().with_rating(-1.0).rating, 0.0);
    }

    #[test]
    fn test_remaining_stock() {
        let p = lamp();
        assert_eq!(p.remaining_stock(10), 5);
        assert_eq!(p.remaining_stock(20), 0);
    }

    #[test]
    fn test_with_images_sets_primary() {
        let p = lamp().with_images(["a.jpg", "b.jpg"]);
        assert_eq!(p.image, "a.jpg");
        assert_eq!(p.images.len(), 2);
    }
}
