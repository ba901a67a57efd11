//! The SAVA storefront.
//!
//! Ties the store to the shopper: configuration, logging, per-visitor
//! session state, localised labels and the page handlers that turn store
//! data into view models.
//!
//! # Example
//!
//! ```rust
//! use sava_commerce::ProductId;
//! use sava_store::MemoryStore;
//! use sava_storefront::{Page, Settings, Storefront};
//!
//! let shop = Storefront::new(MemoryStore::with_sample_catalog(), Settings::default());
//! let mut session = shop.new_session();
//!
//! shop.add_to_cart(&mut session, &ProductId::new("prod_001"), 2).unwrap();
//! assert_eq!(session.cart_count, 2);
//!
//! session.navigate_to(Page::Cart);
//! let response = shop.route(&mut session);
//! assert_eq!(response.view().unwrap().page(), Page::Cart);
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod page;
pub mod session;
pub mod storefront;
pub mod views;

pub use config::{ConfigError, Environment, Settings};
pub use error::{ErrorHandler, ErrorKind, Notice, Severity, StorefrontError};
pub use i18n::Lang;
pub use page::Page;
pub use session::{AuthTab, CheckoutStep, SessionState};
pub use storefront::{SignedIn, Storefront};
pub use views::{Outcome, PageView, Response};
