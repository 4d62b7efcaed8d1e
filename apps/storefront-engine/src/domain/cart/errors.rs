//! Cart errors.

use std::fmt;

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The cart holds no usable lines at checkout.
    EmptyCart {
        /// Owner key of the offending cart.
        owner: String,
    },

    /// A referenced line is not in the cart.
    LineNotFound {
        /// Product ID of the missing line.
        product_id: String,
    },

    /// Invalid cart line parameters.
    InvalidLine {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCart { owner } => {
                write!(f, "Cart for {owner} has no purchasable items")
            }
            Self::LineNotFound { product_id } => {
                write!(f, "Cart line not found for product: {product_id}")
            }
            Self::InvalidLine { field, message } => {
                write!(f, "Invalid cart line parameter '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for CartError {}
