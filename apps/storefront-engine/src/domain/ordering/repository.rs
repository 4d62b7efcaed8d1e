//! Order Repository Trait

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use crate::domain::shared::{CustomerId, OrderId};

/// Repository trait for Order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Find all orders for a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Order>, OrderError>;

    /// Find all orders. Feeds the sales projection.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Delete an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the order is missing or deletion fails.
    async fn delete(&self, id: &OrderId) -> Result<(), OrderError>;
}
