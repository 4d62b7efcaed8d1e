//! Cart Repository Trait

use async_trait::async_trait;

use super::aggregate::Cart;
use super::errors::CartError;
use super::value_objects::CartOwner;

/// Repository trait for Cart persistence.
///
/// Carts are keyed by owner: each owner holds at most one cart.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Save a cart (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, cart: &Cart) -> Result<(), CartError>;

    /// Find the cart for an owner.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_owner(&self, owner: &CartOwner) -> Result<Option<Cart>, CartError>;

    /// Delete the cart for an owner. Deleting an absent cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns error if deletion fails.
    async fn delete_by_owner(&self, owner: &CartOwner) -> Result<(), CartError>;
}
