//! HTTP response DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Error payload surfaced to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ErrorBody,
}

/// Body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Create an error response.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// A catalog product, as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price in dollars.
    pub unit_price: Decimal,
    /// Units available.
    pub stock: u32,
    /// Units committed to orders.
    pub sold: u32,
    /// Whether the product is on sale.
    pub active: bool,
}

impl ProductResponse {
    /// Build a response from the aggregate.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id().as_str().to_string(),
            name: product.name().to_string(),
            unit_price: product.unit_price().amount(),
            stock: product.stock().value(),
            sold: product.sold().value(),
            active: product.is_active(),
        }
    }
}
