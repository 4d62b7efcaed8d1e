//! Logging notifier adapter.
//!
//! Stands in for the mail/webhook collaborator: each event becomes a
//! structured log line. Publication never fails, matching the best-effort
//! contract of the port.

use async_trait::async_trait;

use crate::application::ports::{NotifierPort, NotifyError};
use crate::domain::ordering::events::OrderEvent;

/// Notifier that writes events to the log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a new LogNotifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifierPort for LogNotifier {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), NotifyError> {
        for event in events {
            tracing::info!(
                event = event.event_type(),
                order_id = %event.order_id(),
                occurred_at = %event.occurred_at(),
                "Order notification"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::events::OrderDelivered;
    use crate::domain::shared::{CustomerId, OrderId, Timestamp};

    #[tokio::test]
    async fn publishing_never_fails() {
        let notifier = LogNotifier::new();
        let events = vec![OrderEvent::Delivered(OrderDelivered {
            order_id: OrderId::new("ord-1"),
            customer_id: CustomerId::new("c-1"),
            occurred_at: Timestamp::now(),
        })];
        assert!(notifier.publish_order_events(events).await.is_ok());
    }
}
