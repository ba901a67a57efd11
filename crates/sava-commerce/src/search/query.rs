//! Product query builder.

use crate::catalog::Product;
use crate::search::{Pagination, SearchResults};
use serde::{Deserialize, Serialize};

/// Default page size for product listings.
pub const DEFAULT_PER_PAGE: usize = 24;

/// A product listing query.
///
/// Filters apply in order: category, then text search, then `limit`.
/// Pagination slices whatever survives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    /// Exact category (case-insensitive).
    pub category: Option<String>,
    /// Text matched against name, description and category.
    pub search: Option<String>,
    /// Hard cap on the number of matches.
    pub limit: Option<usize>,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Create a query matching everything.
    pub fn new() -> Self {
        Self {
            category: None,
            search: None,
            limit: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Restrict to a category. Blank values are ignored.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = Some(category).filter(|c| !c.trim().is_empty());
        self
    }

    /// Set the text query. Blank values are ignored.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.search = Some(q).filter(|q| !q.trim().is_empty());
        self
    }

    /// Cap the number of matches.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Check if a product passes the category and search filters.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| product.in_category(c));
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |q| product.matches_search(q));
        category_ok && search_ok
    }

    /// Filter products, keeping their order and honouring `limit`.
    pub fn filter<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Slice already-filtered products to the requested page.
    pub fn paginate(&self, products: Vec<Product>) -> SearchResults<Product> {
        let pagination = Pagination::new(self.page, self.per_page, products.len());
        let items = products
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();
        SearchResults::new(items, pagination)
    }
}
