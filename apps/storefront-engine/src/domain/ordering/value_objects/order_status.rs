//! Order status in the fulfilment lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fulfilment status of an order.
///
/// The happy path is `Pending -> Processing -> Shipped -> Delivered`;
/// `Cancelled` is reachable from any non-terminal status and `Returned`
/// from `Shipped`/`Delivered`. Payment progress (`payment_due` reaching
/// zero) is an independent axis tracked on the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, deposit not yet confirmed.
    Pending,
    /// Deposit confirmed, being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled within the window; inventory released, deposit refunded.
    Cancelled,
    /// Sent back after shipping or delivery.
    Returned,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state.
    ///
    /// Terminal orders never mutate inventory again.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Returned)
    }

    /// Returns true if the order may still be cancelled (window permitting).
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the order counts against active fulfilment work.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Shipped)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Returned => write!(f, "RETURNED"),
        }
    }
}
