//! A single line on an order.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::errors::OrderError;
use crate::domain::shared::{Money, ProductId, Quantity};

/// One product entry on an order.
///
/// Name and unit price are copied snapshots: later catalog edits must not
/// retroactively alter historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    product_id: ProductId,
    name: String,
    quantity: Quantity,
    unit_price: Money,
}

impl OrderLine {
    /// Create a line from product snapshot data.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity or price is invalid.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        quantity: Quantity,
        unit_price: Money,
    ) -> Result<Self, OrderError> {
        quantity
            .validate_for_line()
            .map_err(|e| OrderError::InvalidParameters {
                field: "quantity".to_string(),
                message: e.to_string(),
            })?;
        unit_price
            .validate_price()
            .map_err(|e| OrderError::InvalidParameters {
                field: "unit_price".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            product_id,
            name: name.into(),
            quantity,
            unit_price,
        })
    }

    /// Get the referenced product ID.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Get the name snapshot.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the unit price snapshot.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Line total.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity.value()
    }
}
