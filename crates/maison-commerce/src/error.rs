//! Commerce error types.

use thiserror::Error;

/// Errors raised by storefront domain rules and form validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A form field failed validation.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Product is sold out.
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Order can no longer be cancelled.
    #[error("Order {id} cannot be cancelled while {status}")]
    NotCancellable { id: String, status: String },
}

impl CommerceError {
    /// Shorthand for a validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CommerceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending form field, for inline error placement.
    pub fn field(&self) -> Option<&str> {
        match self {
            CommerceError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
