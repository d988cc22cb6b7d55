//! Search module.
//!
//! In-memory filtering, sorting and pagination of product listings.

mod filter;
mod query;
mod results;

pub use filter::{Filter, PriceBucket};
pub use query::{SearchQuery, SortOption, DEFAULT_PER_PAGE};
pub use results::{FacetValue, Pagination, SearchResults};
