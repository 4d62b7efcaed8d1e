//! Domain events for the order lifecycle.
//!
//! Events feed the notification collaborator; publishing is best-effort and
//! never fails the originating operation.

use serde::{Deserialize, Serialize};

use super::value_objects::{CancelReason, OrderNumber};
use crate::domain::shared::{CustomerId, Money, OrderId, Timestamp};

/// All order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Order placed and deposit confirmed.
    Placed(OrderPlaced),
    /// Order delivered to the customer.
    Delivered(OrderDelivered),
    /// Order cancelled (by customer or admin).
    Cancelled(OrderCancelled),
    /// The full total has been collected.
    PaymentCompleted(OrderPaymentCompleted),
}

impl OrderEvent {
    /// Get the order ID for this event.
    #[must_use]
    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::Placed(e) => &e.order_id,
            Self::Delivered(e) => &e.order_id,
            Self::Cancelled(e) => &e.order_id,
            Self::PaymentCompleted(e) => &e.order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub fn occurred_at(&self) -> Timestamp {
        match self {
            Self::Placed(e) => e.occurred_at,
            Self::Delivered(e) => e.occurred_at,
            Self::Cancelled(e) => e.occurred_at,
            Self::PaymentCompleted(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Placed(_) => "ORDER_PLACED",
            Self::Delivered(_) => "ORDER_DELIVERED",
            Self::Cancelled(_) => "ORDER_CANCELLED",
            Self::PaymentCompleted(_) => "ORDER_PAYMENT_COMPLETED",
        }
    }
}

/// Event: order placed and confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    /// Order ID.
    pub order_id: OrderId,
    /// Customer-facing order number.
    pub order_number: OrderNumber,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Grand total.
    pub total: Money,
    /// Deposit collected at placement.
    pub deposit: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelivered {
    /// Order ID.
    pub order_id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    /// Order ID.
    pub order_id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Why the order was cancelled.
    pub reason: CancelReason,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: the full total has been collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPaymentCompleted {
    /// Order ID.
    pub order_id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Grand total collected.
    pub total: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
