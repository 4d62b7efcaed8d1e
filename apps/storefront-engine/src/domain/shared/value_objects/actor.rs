//! Authenticated principal acting on the engine.
//!
//! Identity issuance is an upstream concern; the engine only consumes the
//! resolved `{id, role}` pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CustomerId;

/// Role carried by an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular storefront customer.
    Customer,
    /// Back-office administrator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: CustomerId,
    role: Role,
}

impl Actor {
    /// Create an actor with an explicit role.
    #[must_use]
    pub const fn new(id: CustomerId, role: Role) -> Self {
        Self { id, role }
    }

    /// Create a customer actor.
    #[must_use]
    pub const fn customer(id: CustomerId) -> Self {
        Self::new(id, Role::Customer)
    }

    /// Create an admin actor.
    #[must_use]
    pub const fn admin(id: CustomerId) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Get the principal's ID.
    #[must_use]
    pub const fn id(&self) -> &CustomerId {
        &self.id
    }

    /// Get the principal's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns true if this principal holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if this principal may act on resources owned by `owner`.
    ///
    /// Admins may act on anyone's resources; customers only on their own.
    #[must_use]
    pub fn can_act_for(&self, owner: &CustomerId) -> bool {
        self.is_admin() || &self.id == owner
    }
}
