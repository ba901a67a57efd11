//! Order types.

use crate::cart::{LineItem, Totals};
use crate::checkout::{Address, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of the order ID shown to customers.
pub const SHORT_ID_LEN: usize = 8;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// What the checkout form submits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrderDraft {
    /// Where to ship.
    pub shipping_address: Address,
    /// How the customer pays.
    pub payment_method: PaymentMethod,
}

impl OrderDraft {
    pub fn new(shipping_address: Address, payment_method: PaymentMethod) -> Self {
        Self {
            shipping_address,
            payment_method,
        }
    }

    /// Validate the form.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.shipping_address.validate()
    }
}

/// A placed order.
///
/// Totals are a snapshot taken at checkout and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer user ID.
    pub user_id: UserId,
    /// Items in the order.
    pub items: Vec<LineItem>,
    /// Totals at the time of checkout.
    pub totals: Totals,
    /// Order status.
    pub status: OrderStatus,
    /// Shipping address.
    pub shipping_address: Address,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot a validated draft into a pending order.
    pub fn place(
        user_id: UserId,
        items: Vec<LineItem>,
        totals: Totals,
        draft: OrderDraft,
    ) -> Result<Self, CommerceError> {
        if items.is_empty() {
            return Err(CommerceError::Cart("cannot place an order with an empty cart".into()));
        }
        draft.validate()?;

        Ok(Self {
            id: OrderId::generate(),
            user_id,
            items,
            totals,
            status: OrderStatus::Pending,
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            created_at: Utc::now(),
        })
    }

    /// Order number shown to customers.
    pub fn short_id(&self) -> String {
        self.id
            .as_str()
            .chars()
            .take(SHORT_ID_LEN)
            .collect::<String>()
            .to_uppercase()
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
