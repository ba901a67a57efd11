//! Product catalog module.
//!
//! Products are owned by the store; the storefront only reads them.

mod product;

pub use product::{Product, ProductImage, MAX_PURCHASE_PER_VISIT, PLACEHOLDER_IMAGE_URL};
