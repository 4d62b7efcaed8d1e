//! Shipping destination captured on the order.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::errors::OrderError;

/// Where the order ships. Snapshot on the order; address-book management is
/// an upstream concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name.
    pub recipient: String,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

impl ShippingAddress {
    /// Validate that all fields are filled.
    ///
    /// # Errors
    ///
    /// Returns error naming the first empty field.
    pub fn validate(&self) -> Result<(), OrderError> {
        let fields = [
            ("recipient", &self.recipient),
            ("street", &self.street),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(OrderError::InvalidParameters {
                    field: format!("shipping_address.{name}"),
                    message: "Field cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
