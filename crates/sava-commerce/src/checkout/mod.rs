//! Checkout module.
//!
//! Contains the shipping address form, payment methods and order snapshots.

mod address;
mod order;

pub use address::{Address, PaymentMethod};
pub use order::{Order, OrderDraft, OrderStatus, SHORT_ID_LEN};
