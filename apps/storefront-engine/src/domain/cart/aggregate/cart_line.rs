//! A single line in a shopping cart.

use serde::{Deserialize, Serialize};

use crate::domain::cart::errors::CartError;
use crate::domain::shared::{Money, ProductId, Quantity, Timestamp};

/// One product entry in a cart.
///
/// The name and unit price are snapshots captured when the line was added;
/// later catalog edits do not rewrite carts. Quantities are re-checked
/// against live stock when the cart is read or materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product_id: ProductId,
    name: String,
    quantity: Quantity,
    price_at_addition: Money,
    added_at: Timestamp,
}

impl CartLine {
    /// Create a new line with a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is zero or exceeds the per-line ceiling.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        quantity: Quantity,
        price_at_addition: Money,
    ) -> Result<Self, CartError> {
        quantity
            .validate_for_line()
            .map_err(|e| CartError::InvalidLine {
                field: "quantity".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            product_id,
            name: name.into(),
            quantity,
            price_at_addition,
            added_at: Timestamp::now(),
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

    /// Get the unit price captured at add time.
    #[must_use]
    pub const fn price_at_addition(&self) -> Money {
        self.price_at_addition
    }

    /// Get the timestamp the line was first added.
    #[must_use]
    pub const fn added_at(&self) -> Timestamp {
        self.added_at
    }

    /// Line total at the snapshot price.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price_at_addition * self.quantity.value()
    }

    pub(crate) fn increase_quantity(&mut self, extra: Quantity) {
        self.quantity = self.quantity.saturating_add(extra);
    }

    pub(crate) const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}
