//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category description.
    pub description: String,
    /// Category image URL.
    pub image: String,
}

impl Category {
    /// Create a new category.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            image: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Slug that products use to refer to this category ("Home Decor" -> "home_decor").
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Normalize a category name or slug: trimmed, lowercase, spaces and
/// dashes become underscores.
pub fn slugify(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        let category = Category::new("5", "Home Decor", "Decorative accents");
        assert_eq!(category.slug(), "home_decor");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        assert_eq!(slugify("home_decor"), "home_decor");
        assert_eq!(slugify(" Lighting "), "lighting");
        assert_eq!(slugify("home-decor"), "home_decor");
    }
}
