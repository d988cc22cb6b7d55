//! Catalog lookups.

use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{seed, Category, Product};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};

/// Read-only provider of product and category data.
///
/// Lookups are asynchronous and may suspend while data is fetched. A missing
/// record is `Ok(None)`, not an error.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products, in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError>;

    /// A single product by id.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError>;

    /// Products flagged as featured.
    async fn list_featured(&self) -> Result<Vec<Product>, CommerceError>;

    /// Products in a category, matched case-insensitively by name or slug.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CommerceError>;

    /// Products whose name or description contains `text`, ignoring case.
    async fn search(&self, text: &str) -> Result<Vec<Product>, CommerceError>;

    /// All categories.
    async fn list_categories(&self) -> Result<Vec<Category>, CommerceError>;

    /// A single category by id.
    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, CommerceError>;
}

/// Artificial delays applied before each lookup resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLatency {
    /// Product listings, featured, category listings and search.
    pub listing: Duration,
    /// Single product and the category list.
    pub detail: Duration,
    /// Single category.
    pub category: Duration,
}

impl CatalogLatency {
    /// Resolve every lookup immediately.
    pub const fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// Same delay for every lookup.
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            listing: delay,
            detail: delay,
            category: delay,
        }
    }
}

impl Default for CatalogLatency {
    fn default() -> Self {
        Self {
            listing: Duration::from_millis(500),
            detail: Duration::from_millis(300),
            category: Duration::from_millis(200),
        }
    }
}

/// In-process catalog backed by a fixed product and category list.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    latency: CatalogLatency,
}

impl InMemoryCatalog {
    /// Create a catalog over the given records, with no latency.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
            latency: CatalogLatency::none(),
        }
    }

    /// The built-in demo catalog.
    pub fn seeded() -> Self {
        Self::new(seed::products(), seed::categories())
    }

    pub fn with_latency(mut self, latency: CatalogLatency) -> Self {
        self.latency = latency;
        self
    }

    async fn wait(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn filtered(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products.iter().filter(|p| keep(p)).cloned().collect()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        Self::wait(self.latency.listing).await;
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        Self::wait(self.latency.detail).await;
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_featured(&self) -> Result<Vec<Product>, CommerceError> {
        Self::wait(self.latency.listing).await;
        Ok(self.filtered(|p| p.featured))
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CommerceError> {
        Self::wait(self.latency.listing).await;
        Ok(self.filtered(|p| p.in_category(category)))
    }

    async fn search(&self, text: &str) -> Result<Vec<Product>, CommerceError> {
        Self::wait(self.latency.listing).await;
        tracing::debug!(query = text, "catalog search");
        Ok(self.filtered(|p| p.matches_text(text)))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CommerceError> {
        Self::wait(self.latency.detail).await;
        Ok(self.categories.clone())
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, CommerceError> {
        Self::wait(self.latency.category).await;
        Ok(self.categories.iter().find(|c| &c.id == id).cloned())
    }
}
