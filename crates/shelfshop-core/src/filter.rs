//! Gallery filtering over an already-normalized product list.
//!
//! Filtering is a pure predicate: a category (or `All`) combined with a
//! case-insensitive search over titles and tags. Nothing here touches the
//! network.

use serde::{Deserialize, Serialize};

use crate::products::NormalizedProduct;

/// Label of the catch-all category option.
pub const ALL_CATEGORIES: &str = "All";

/// Category selection for the product gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Type(String),
}

impl CategoryFilter {
    /// Parses a category label; `None`, blank, and `"All"` select everything.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => Self::All,
            Some(other) => Self::Type(other.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Type(t) => t,
        }
    }

    fn matches(&self, product: &NormalizedProduct) -> bool {
        match self {
            Self::All => true,
            Self::Type(t) => product.product_type == *t,
        }
    }
}

/// Category plus free-text search applied to a product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: CategoryFilter,
    query: String,
}

impl ProductFilter {
    #[must_use]
    pub fn new(category: CategoryFilter, query: &str) -> Self {
        Self {
            category,
            query: query.trim().to_lowercase(),
        }
    }

    /// Returns `true` if `product` passes both the category and the search.
    #[must_use]
    pub fn matches(&self, product: &NormalizedProduct) -> bool {
        self.category.matches(product) && self.matches_query(product)
    }

    fn matches_query(&self, product: &NormalizedProduct) -> bool {
        if self.query.is_empty() {
            return true;
        }
        product.title.to_lowercase().contains(&self.query)
            || product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&self.query))
    }

    /// Resets the category to `All` when it names a type no longer present
    /// in `products`.
    #[must_use]
    pub fn reconcile(mut self, products: &[NormalizedProduct]) -> Self {
        if let CategoryFilter::Type(t) = &self.category {
            if !product_types(products).iter().any(|known| known == t) {
                tracing::debug!(category = %t, "active category not in catalog; resetting to All");
                self.category = CategoryFilter::All;
            }
        }
        self
    }

    /// Applies the filter, preserving catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [NormalizedProduct]) -> Vec<&'a NormalizedProduct> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Applies the filter and classifies the outcome for display.
    #[must_use]
    pub fn listing<'a>(&self, products: &'a [NormalizedProduct]) -> GalleryListing<'a> {
        if products.is_empty() {
            return GalleryListing::Empty;
        }
        let filtered = self.apply(products);
        if filtered.is_empty() {
            GalleryListing::NoMatches
        } else {
            GalleryListing::Products(filtered)
        }
    }
}

/// Result of filtering the gallery.
#[derive(Debug, PartialEq)]
pub enum GalleryListing<'a> {
    /// The catalog itself is empty (unconfigured, failed, or no products).
    Empty,
    /// Products exist but none pass the filter.
    NoMatches,
    Products(Vec<&'a NormalizedProduct>),
}

/// Listing state name used by the JSON API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    Empty,
    NoMatches,
    Products,
}

impl GalleryListing<'_> {
    #[must_use]
    pub fn state(&self) -> ListingState {
        match self {
            Self::Empty => ListingState::Empty,
            Self::NoMatches => ListingState::NoMatches,
            Self::Products(_) => ListingState::Products,
        }
    }
}

/// Unique, non-empty product types in first-seen order.
#[must_use]
pub fn product_types(products: &[NormalizedProduct]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for product in products {
        let t = product.product_type.as_str();
        if !t.is_empty() && !types.iter().any(|known| known == t) {
            types.push(t.to_string());
        }
    }
    types
}

/// Category options for the gallery: `"All"` followed by each product type.
#[must_use]
pub fn filter_options(products: &[NormalizedProduct]) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(product_types(products))
        .collect()
}
