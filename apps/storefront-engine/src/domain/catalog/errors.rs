//! Catalog and inventory errors.

use std::fmt;

/// Errors raised by the product catalog and its inventory ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Invalid product parameters.
    InvalidProduct {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Not enough stock to cover a reservation.
    InsufficientStock {
        /// Product being reserved.
        product_id: String,
        /// Units requested.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// Product is not available for sale.
    ProductInactive {
        /// Product ID.
        product_id: String,
    },

    /// Product not found.
    NotFound {
        /// Product ID.
        product_id: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProduct { field, message } => {
                write!(f, "Invalid product parameter '{field}': {message}")
            }
            Self::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient stock for {product_id}: requested {requested}, available {available}"
                )
            }
            Self::ProductInactive { product_id } => {
                write!(f, "Product is not active: {product_id}")
            }
            Self::NotFound { product_id } => {
                write!(f, "Product not found: {product_id}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
