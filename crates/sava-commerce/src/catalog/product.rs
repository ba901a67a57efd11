//! Product types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Image shown when a product has none.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x400/E2E8F0/64748B?text=No+Image";

/// Most units a shopper can pick on a product page in one go.
pub const MAX_PURCHASE_PER_VISIT: i64 = 10;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Units in stock.
    pub stock: i64,
    /// Category name.
    pub category: String,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub reviews_count: u32,
    /// Product images, first one is the primary.
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Create a new product with no stock, category or images.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            stock: 0,
            category: String::new(),
            rating: 0.0,
            reviews_count: 0,
            images: Vec::new(),
        }
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an image.
    pub fn with_image(mut self, url: impl Into<String>, alt: impl Into<String>) -> Self {
        self.images.push(ProductImage {
            url: url.into(),
            alt: alt.into(),
        });
        self
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check that `requested` units can be supplied.
    pub fn check_stock(&self, requested: i64) -> Result<(), CommerceError> {
        if requested > self.stock {
            return Err(CommerceError::InsufficientStock {
                product_id: self.id.to_string(),
                requested,
                available: self.stock.max(0),
            });
        }
        Ok(())
    }

    /// Largest quantity offered on the product page.
    pub fn max_purchasable(&self) -> i64 {
        self.stock.clamp(0, MAX_PURCHASE_PER_VISIT)
    }

    /// URL of the primary image, or a placeholder.
    pub fn primary_image_url(&self) -> &str {
        self.images
            .first()
            .map(|image| image.url.as_str())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Whole stars to draw for the rating.
    pub fn rating_stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).floor() as u8
    }

    /// Check if this product belongs to `category` (case-insensitive).
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }

    /// Case-insensitive match against name, description and category.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt: String,
}
