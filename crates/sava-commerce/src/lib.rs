//! E-commerce domain types and cart pricing for the SAVA storefront.
//!
//! This crate holds everything the storefront computes locally:
//!
//! - **Catalog**: Products and their stock
//! - **Cart**: Line items, the merge-or-append mutator, totals
//! - **Checkout**: Shipping address, payment method, order snapshots
//! - **Search**: Product queries and pagination
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use sava_commerce::prelude::*;
//!
//! let product = Product::new("prod-1", "Wireless Mouse", Money::usd(Decimal::new(2999, 2)));
//!
//! let mut cart = Cart::new(Currency::USD);
//! cart.add(&product, 2).unwrap();
//!
//! let totals = cart.totals(&PricingPolicy::default()).unwrap();
//! assert_eq!(totals.subtotal.display(), "$59.98");
//! assert!(totals.shipping.is_zero());
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
    pub use crate::catalog::{Product, ProductImage};

    // Cart
    pub use crate::cart::{compute_totals, Cart, LineItem, PricingPolicy, Totals, MAX_QUANTITY_PER_ITEM};

    // Checkout
    pub use crate::checkout::{Address, Order, OrderDraft, OrderStatus, PaymentMethod};

    // Search
    pub use crate::search::{Pagination, ProductQuery, SearchResults};
}
