//! Human-facing order numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short unique order reference shown to customers and support staff.
///
/// Distinct from the internal `OrderId`; the number is what appears on
/// invoices and notification mail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a new order number of the form `SO-XXXXXXXXXX`.
    #[must_use]
    pub fn generate() -> Self {
        let raw = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        Self(format!("SO-{}", &raw[..10]))
    }

    /// Get the number as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_have_prefix_and_length() {
        let n = OrderNumber::generate();
        assert!(n.as_str().starts_with("SO-"));
        assert_eq!(n.as_str().len(), 13);
    }

    #[test]
    fn generated_numbers_are_unique() {
        assert_ne!(OrderNumber::generate(), OrderNumber::generate());
    }
}
