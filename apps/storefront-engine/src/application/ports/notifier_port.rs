//! Notifier Port (Driven Port)
//!
//! Interface for the notification collaborator (order-confirmed mail and the
//! like). Publication is fire-and-forget: callers log failures and never
//! propagate them into the business operation.

use async_trait::async_trait;

use crate::domain::ordering::events::OrderEvent;

/// Notification error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotifyError {
    /// Delivery channel unreachable.
    #[error("Notification channel unavailable: {message}")]
    ChannelUnavailable {
        /// Error details.
        message: String,
    },

    /// Event could not be rendered.
    #[error("Notification serialization error: {message}")]
    SerializationError {
        /// Error details.
        message: String,
    },
}

/// Port for publishing order events to the notification collaborator.
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Publish order events.
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), NotifyError>;

    /// Publish a single order event.
    async fn publish_order_event(&self, event: OrderEvent) -> Result<(), NotifyError> {
        self.publish_order_events(vec![event]).await
    }
}

/// No-op notifier for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl NotifierPort for NoOpNotifier {
    async fn publish_order_events(&self, _events: Vec<OrderEvent>) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::events::{OrderDelivered, OrderEvent};
    use crate::domain::shared::{CustomerId, OrderId, Timestamp};

    #[tokio::test]
    async fn no_op_notifier_succeeds() {
        let notifier = NoOpNotifier;

        let event = OrderEvent::Delivered(OrderDelivered {
            order_id: OrderId::new("ord-1"),
            customer_id: CustomerId::new("c-1"),
            occurred_at: Timestamp::now(),
        });

        assert!(notifier.publish_order_event(event).await.is_ok());
    }
}
