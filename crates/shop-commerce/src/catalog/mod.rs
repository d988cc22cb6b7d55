//! Product catalog module.
//!
//! Contains product and category records and the asynchronous catalog
//! source the presentation layer queries.

mod category;
mod product;
pub mod seed;
mod source;

pub use category::{slugify, Category};
pub use product::{Product, MAX_RATING};
pub use source::{CatalogLatency, CatalogSource, InMemoryCatalog};
