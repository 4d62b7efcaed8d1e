//! Payment Repository Trait

use async_trait::async_trait;

use super::aggregate::Payment;
use super::errors::PaymentError;
use crate::domain::shared::{OrderId, PaymentId};

/// Repository trait for Payment persistence.
///
/// Multiple payment records accumulate per order over time (deposit,
/// balance), so lookups by order return a list.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Save a payment (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, payment: &Payment) -> Result<(), PaymentError>;

    /// Find a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError>;

    /// Find all payments for an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_order(&self, order_id: &OrderId) -> Result<Vec<Payment>, PaymentError>;

    /// Delete a payment by ID. Deleting an absent payment is a no-op.
    ///
    /// # Errors
    ///
    /// Returns error if deletion fails.
    async fn delete(&self, id: &PaymentId) -> Result<(), PaymentError>;
}
