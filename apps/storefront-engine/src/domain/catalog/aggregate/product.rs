//! Product Aggregate Root
//!
//! Carries the inventory ledger: `stock` (available units) and `sold`
//! (units committed to orders). `reserve` and `release` are the only legal
//! mutators of those counters.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::errors::CatalogError;
use crate::domain::shared::{Money, ProductId, Quantity, Timestamp};

/// Command to create a new product.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    /// Display name.
    pub name: String,
    /// Unit price (positive, at most 2 decimal places).
    pub unit_price: Money,
    /// Initial stock on hand.
    pub stock: Quantity,
}

impl CreateProductCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns error if required parameters are missing or invalid.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidProduct {
                field: "name".to_string(),
                message: "Product name cannot be empty".to_string(),
            });
        }

        self.unit_price
            .validate_price()
            .map_err(|e| CatalogError::InvalidProduct {
                field: "unit_price".to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Product Aggregate Root.
///
/// Inventory invariant: `stock` never goes negative, and every reservation
/// of `q` units moves exactly `q` from `stock` to `sold` (a release moves
/// them back).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
    stock: Quantity,
    sold: Quantity,
    active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Product {
    /// Create a new product from a command.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn new(cmd: CreateProductCommand) -> Result<Self, CatalogError> {
        cmd.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id: ProductId::generate(),
            name: cmd.name,
            unit_price: cmd.unit_price,
            stock: cmd.stock,
            sold: Quantity::ZERO,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the product ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Get the units currently available.
    #[must_use]
    pub const fn stock(&self) -> Quantity {
        self.stock
    }

    /// Get the units committed to orders.
    #[must_use]
    pub const fn sold(&self) -> Quantity {
        self.sold
    }

    /// Returns true if the product is available for sale.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if at least one unit is available.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        !self.stock.is_zero()
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========================================================================
    // Catalog maintenance
    // ========================================================================

    /// Change the unit price.
    ///
    /// Orders hold price snapshots, so this never alters history.
    ///
    /// # Errors
    ///
    /// Returns error if the new price is invalid.
    pub fn set_price(&mut self, price: Money) -> Result<(), CatalogError> {
        price
            .validate_price()
            .map_err(|e| CatalogError::InvalidProduct {
                field: "unit_price".to_string(),
                message: e.to_string(),
            })?;
        self.unit_price = price;
        self.touch();
        Ok(())
    }

    /// Add units to stock (goods received).
    pub fn restock(&mut self, units: Quantity) {
        self.stock = self.stock.saturating_add(units);
        self.touch();
    }

    /// Take the product off sale. Existing order snapshots are unaffected.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.touch();
    }

    /// Put the product back on sale.
    pub fn activate(&mut self) {
        self.active = true;
        self.touch();
    }

    // ========================================================================
    // Inventory ledger
    // ========================================================================

    /// Reserve units for an order: move them from `stock` to `sold`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` (with requested/available counts) if the
    /// stock cannot cover the reservation.
    pub fn reserve(&mut self, units: Quantity) -> Result<(), CatalogError> {
        let remaining =
            self.stock
                .checked_sub(units)
                .ok_or_else(|| CatalogError::InsufficientStock {
                    product_id: self.id.as_str().to_string(),
                    requested: units.value(),
                    available: self.stock.value(),
                })?;

        self.stock = remaining;
        self.sold = self.sold.saturating_add(units);
        self.touch();
        Ok(())
    }

    /// Undo a reservation: move units from `sold` back to `stock`.
    ///
    /// `sold` clamps at zero rather than underflowing; a release can only
    /// undo reservations this engine made.
    pub fn release(&mut self, units: Quantity) {
        self.stock = self.stock.saturating_add(units);
        self.sold = self.sold.saturating_sub(units);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
