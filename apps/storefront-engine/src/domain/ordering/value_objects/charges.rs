//! Derived money fields on an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::errors::OrderError;
use crate::domain::shared::Money;

/// The money breakdown of an order.
///
/// Invariant: `total == items + tax + shipping`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
    items: Money,
    tax: Money,
    shipping: Money,
    total: Money,
}

impl Charges {
    /// Compute charges from the item subtotal and checkout policy inputs.
    ///
    /// Tax is a fraction of the item subtotal, rounded to cents.
    #[must_use]
    pub fn compute(items: Money, tax_rate: Decimal, shipping: Money) -> Self {
        let tax = items.fraction(tax_rate);
        Self {
            items,
            tax,
            shipping,
            total: items + tax + shipping,
        }
    }

    /// Rebuild charges from stored parts.
    ///
    /// # Errors
    ///
    /// Returns error if any part is negative or the parts do not sum to the
    /// total.
    pub fn from_parts(
        items: Money,
        tax: Money,
        shipping: Money,
        total: Money,
    ) -> Result<Self, OrderError> {
        if items.is_negative() || tax.is_negative() || shipping.is_negative() {
            return Err(OrderError::InvalidCharges {
                message: "Charge parts cannot be negative".to_string(),
            });
        }
        if items + tax + shipping != total {
            return Err(OrderError::InvalidCharges {
                message: format!(
                    "Total {total} does not equal items {items} + tax {tax} + shipping {shipping}"
                ),
            });
        }
        Ok(Self {
            items,
            tax,
            shipping,
            total,
        })
    }

    /// Item subtotal.
    #[must_use]
    pub const fn items(&self) -> Money {
        self.items
    }

    /// Tax amount.
    #[must_use]
    pub const fn tax(&self) -> Money {
        self.tax
    }

    /// Shipping amount.
    #[must_use]
    pub const fn shipping(&self) -> Money {
        self.shipping
    }

    /// Grand total.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }
}
