//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(ProductId, "Unique identifier for a catalog product.");
define_id!(CartId, "Unique identifier for a shopping cart.");
define_id!(OrderId, "Unique identifier for an order.");
define_id!(PaymentId, "Unique identifier for a payment record.");
define_id!(CustomerId, "Unique identifier for a customer account.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_new_and_display() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
        assert_eq!(format!("{id}"), "prod-123");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
        assert_ne!(PaymentId::generate(), PaymentId::generate());
    }

    #[test]
    fn id_equality() {
        assert_eq!(CustomerId::new("c-1"), CustomerId::new("c-1"));
        assert_ne!(CustomerId::new("c-1"), CustomerId::new("c-2"));
    }

    #[test]
    fn id_from_string() {
        let id: CartId = "cart-9".into();
        assert_eq!(id.as_str(), "cart-9");

        let id: CartId = String::from("cart-10").into();
        assert_eq!(id.into_inner(), "cart-10");
    }

    #[test]
    fn serde_roundtrip() {
        let id = OrderId::new("ord-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ord-123\"");

        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn hash_works_for_collections() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ProductId::new("p-1"));
        set.insert(ProductId::new("p-2"));
        set.insert(ProductId::new("p-1")); // duplicate

        assert_eq!(set.len(), 2);
    }
}
