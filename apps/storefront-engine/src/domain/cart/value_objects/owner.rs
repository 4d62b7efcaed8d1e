//! Cart ownership.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::CustomerId;

/// The single owner of a cart: a registered customer or an anonymous
/// browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CartOwner {
    /// Cart belongs to a registered customer.
    Customer(CustomerId),
    /// Cart belongs to an anonymous session.
    Guest(String),
}

impl CartOwner {
    /// Owner for a registered customer.
    #[must_use]
    pub const fn customer(id: CustomerId) -> Self {
        Self::Customer(id)
    }

    /// Owner for an anonymous session.
    #[must_use]
    pub fn guest(session: impl Into<String>) -> Self {
        Self::Guest(session.into())
    }

    /// Stable storage key for this owner.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Customer(id) => format!("customer:{id}"),
            Self::Guest(session) => format!("guest:{session}"),
        }
    }

    /// Returns true if the owner is an anonymous session.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}

impl fmt::Display for CartOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_keys_are_disjoint() {
        let customer = CartOwner::customer(CustomerId::new("abc"));
        let guest = CartOwner::guest("abc");

        assert_eq!(customer.key(), "customer:abc");
        assert_eq!(guest.key(), "guest:abc");
        assert_ne!(customer, guest);
    }

    #[test]
    fn owner_guest_flag() {
        assert!(CartOwner::guest("s-1").is_guest());
        assert!(!CartOwner::customer(CustomerId::new("c-1")).is_guest());
    }

    #[test]
    fn owner_serde_roundtrip() {
        let owner = CartOwner::customer(CustomerId::new("c-1"));
        let json = serde_json::to_string(&owner).unwrap();
        let parsed: CartOwner = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, owner);
    }
}
