//! Shopping cart module.
//!
//! Contains the cart, its line items, and the totals calculator.

mod cart;
mod totals;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use totals::{compute_totals, PricingPolicy, Totals};
