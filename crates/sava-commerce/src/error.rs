//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog, cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product with ID '{0}' not found")]
    ProductNotFound(String),

    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for product '{product_id}': requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Quantity below one where a positive quantity is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed per line.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Input failed validation.
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// Generic cart failure.
    #[error("Cart operation failed: {0}")]
    Cart(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    /// Validation error tied to a form field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        CommerceError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Validation error not tied to a field.
    pub fn validation(message: impl Into<String>) -> Self {
        CommerceError::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            CommerceError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            CommerceError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            CommerceError::InvalidQuantity(_)
            | CommerceError::QuantityExceedsLimit(..)
            | CommerceError::Validation { .. } => "VALIDATION_ERROR",
            CommerceError::Cart(_)
            | CommerceError::CurrencyMismatch { .. }
            | CommerceError::Overflow => "CART_ERROR",
        }
    }

    /// Check if this was caused by bad caller input.
    pub fn is_validation(&self) -> bool {
        self.code() == "VALIDATION_ERROR"
    }
}
