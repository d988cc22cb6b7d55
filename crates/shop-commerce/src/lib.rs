//! Storefront domain types and logic.
//!
//! This crate provides the pieces behind a small storefront:
//!
//! - **Catalog**: Products, categories, and an async catalog source
//! - **Cart**: A pure transition function and the persisted cart store
//! - **Checkout**: Multi-step checkout flow, validation, order totals
//! - **Search**: In-memory filters, sorting, pagination
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//! use shop_storage::MemoryStorage;
//!
//! let lamp = Product::new("1", "Minimalist Desk Lamp", Money::usd(7999)).with_stock(15);
//!
//! let mut cart = CartStore::open(MemoryStorage::new());
//! cart.add(lamp, 2);
//!
//! let flow = CheckoutFlow::new();
//! let summary = flow.summary(cart.state()).unwrap();
//! assert_eq!(summary.total.display(), "$182.78");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogLatency, CatalogSource, Category, InMemoryCatalog, Product};

    // Cart
    pub use crate::cart::{
        transition, CartAction, CartLine, CartState, CartStore, Notification, Notifier,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, FieldErrors, OrderConfirmation, OrderSummary, PaymentMethod,
        PricingPolicy, ShippingAddress, Validate,
    };

    // Search
    pub use crate::search::{Filter, Pagination, PriceBucket, SearchQuery, SearchResults, SortOption};
}
