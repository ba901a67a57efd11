//! Persistence for the SAVA storefront.
//!
//! The storefront talks to its document store through the traits in this
//! crate. [`MemoryStore`] implements all of them over an in-process state
//! that can be snapshotted to a JSON file.
//!
//! # Example
//!
//! ```rust
//! use sava_commerce::prelude::*;
//! use sava_store::{CartStore, CatalogStore, MemoryStore};
//!
//! let store = MemoryStore::with_sample_catalog();
//! let user = UserId::new("u1");
//!
//! let products = store.get_products(&ProductQuery::new().with_limit(1)).unwrap();
//! store.add_to_cart(&user, &products[0].id, 2).unwrap();
//!
//! assert_eq!(store.get_user_cart(&user).unwrap()[0].quantity, 2);
//! ```

mod error;
mod memory;
pub mod sample;
mod store;

pub use error::StoreError;
pub use memory::{MemoryStore, StoreState};
pub use store::{AccountStore, CartStore, CatalogStore, OrderStore, Store};
