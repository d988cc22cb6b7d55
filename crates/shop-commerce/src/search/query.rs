//! Search query builder.

use crate::catalog::Product;
use crate::search::{FacetValue, Filter, Pagination, SearchResults};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Default number of products per page.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Default,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by highest rated.
    Rating,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::Rating => "rating-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Default => "Default",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A to Z",
            SortOption::NameDesc => "Name: Z to A",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Ordering between two products; `Equal` keeps catalog order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Default => Ordering::Equal,
            SortOption::PriceAsc => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceDesc => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::NameAsc => compare_names(&a.name, &b.name),
            SortOption::NameDesc => compare_names(&b.name, &a.name),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(SortOption::Default),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "name-asc" => Ok(SortOption::NameAsc),
            "name-desc" => Ok(SortOption::NameDesc),
            "rating-desc" | "rating" => Ok(SortOption::Rating),
            other => Err(format!(
                "unknown sort '{other}' (expected default, price-asc, price-desc, name-asc, name-desc or rating-desc)"
            )),
        }
    }
}

/// A product listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Text query.
    pub query: Option<String>,
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchQuery {
    /// Create a new search query.
    pub fn new() -> Self {
        Self {
            query: None,
            filters: Vec::new(),
            sort: SortOption::Default,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let q = q.trim();
        if !q.is_empty() {
            self.query = Some(q.to_string());
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, 100);
        self
    }

    fn matches_text(&self, product: &Product) -> bool {
        self.query.as_deref().map_or(true, |q| product.matches_text(q))
    }

    /// Check a product against the text query and every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_text(product) && self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter, sort and paginate `products`.
    ///
    /// Sorting is stable, so ties keep catalog order. Category counts are
    /// taken over the text matches before any filter applies.
    pub fn apply(&self, products: &[Product]) -> SearchResults<Product> {
        let mut categories: Vec<FacetValue> = Vec::new();
        for product in products.iter().filter(|p| self.matches_text(p)) {
            match categories.iter_mut().find(|f| f.value == product.category) {
                Some(facet) => facet.count += 1,
                None => categories.push(FacetValue {
                    value: product.category.clone(),
                    count: 1,
                    selected: self
                        .filters
                        .iter()
                        .any(|f| matches!(f, Filter::Category(c) if product.in_category(c))),
                }),
            }
        }

        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));

        let pagination = Pagination::new(self.page, self.per_page, matched.len());
        let items = matched
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .cloned()
            .collect();

        SearchResults::new(items, pagination).with_categories(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;
    use crate::search::PriceBucket;

    fn ids(results: &SearchResults<Product>) -> Vec<&str> {
        results.items.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new()
            .with_query("  lamp ")
            .with_filter(Filter::InStock)
            .with_sort(SortOption::PriceAsc)
            .with_pagination(2, 10);

        assert_eq!(query.query.as_deref(), Some("lamp"));
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.sort, SortOption::PriceAsc);
    }

    #[test]
    fn test_default_keeps_catalog_order() {
        let products = seed::products();
        let results = SearchQuery::new().apply(&products);
        assert_eq!(ids(&results), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(results.pagination.total, 8);
    }

    #[test]
    fn test_price_sorts() {
        let products = seed::products();
        let asc = SearchQuery::new().with_sort(SortOption::PriceAsc).apply(&products);
        let prices: Vec<i64> = asc.items.iter().map(|p| p.price.amount_cents).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);

        let desc = SearchQuery::new().with_sort(SortOption::PriceDesc).apply(&products);
        assert_eq!(desc.items.first().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn test_stable_sort_on_ties() {
        let products = vec![
            Product::new("a", "Same", crate::money::Money::usd(100)),
            Product::new("b", "Same", crate::money::Money::usd(100)),
            Product::new("c", "Same", crate::money::Money::usd(100)),
        ];
        let results = SearchQuery::new().with_sort(SortOption::PriceDesc).apply(&products);
        assert_eq!(ids(&results), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filters_combine() {
        let products = seed::products();
        let results = SearchQuery::new()
            .with_filter(PriceBucket::Over100)
            .with_filter(Filter::Featured)
            .apply(&products);
        assert!(!results.is_empty());
        for product in &results.items {
            assert!(product.featured);
            assert!(product.price.amount_cents > 10000);
        }
    }

    #[test]
    fn test_text_and_category_facets() {
        let products = seed::products();
        let query = SearchQuery::new().with_filter(Filter::category("Lighting"));
        let results = query.apply(&products);
        assert!(results.items.iter().all(|p| p.in_category("lighting")));

        let lighting = results
            .categories
            .iter()
            .find(|f| f.value == "lighting")
            .unwrap();
        assert!(lighting.selected);
        let total: usize = results.categories.iter().map(|f| f.count).sum();
        assert_eq!(total, products.len());
    }

    #[test]
    fn test_pagination_slices() {
        let products = seed::products();
        let results = SearchQuery::new().with_pagination(2, 3).apply(&products);
        assert_eq!(ids(&results), vec!["4", "5", "6"]);
        assert_eq!(results.pagination.total_pages, 3);

        let past_end = SearchQuery::new().with_pagination(7, 3).apply(&products);
        assert_eq!(past_end.pagination.page, 3);
        assert_eq!(ids(&past_end), vec!["7", "8"]);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("price-desc".parse::<SortOption>(), Ok(SortOption::PriceDesc));
        assert_eq!("rating-desc".parse::<SortOption>(), Ok(SortOption::Rating));
        assert!("newest".parse::<SortOption>().is_err());
    }
}
