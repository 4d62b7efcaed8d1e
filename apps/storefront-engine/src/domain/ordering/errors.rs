//! Ordering errors.

use std::fmt;

use super::value_objects::OrderStatus;
use crate::domain::shared::Money;

/// Errors that can occur in the order lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Invalid order parameters.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// An order needs at least one line.
    NoLines,

    /// Derived money fields are inconsistent.
    InvalidCharges {
        /// Error message.
        message: String,
    },

    /// Deposit below the required minimum fraction of the total.
    InsufficientDeposit {
        /// Minimum acceptable deposit.
        required: Money,
        /// Deposit the caller offered.
        offered: Money,
    },

    /// Payment would push the collected amount past the total.
    OverPayment {
        /// Outstanding balance.
        due: Money,
        /// Amount offered.
        offered: Money,
    },

    /// Invalid state transition attempted.
    InvalidStateTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Order cannot be cancelled in its current state.
    CannotCancel {
        /// Current status.
        status: OrderStatus,
    },

    /// The cancellation window has closed.
    CancellationWindowExpired {
        /// Order ID.
        order_id: String,
        /// Window length in hours.
        window_hours: i64,
    },

    /// Balance collection requires a delivered order.
    NotYetDelivered {
        /// Current status.
        status: OrderStatus,
    },

    /// Nothing left to collect.
    AlreadyPaid {
        /// Order ID.
        order_id: String,
    },

    /// The acting principal may not perform this operation.
    Forbidden {
        /// What was attempted.
        action: String,
    },

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Hard deletion refused because money has moved.
    PaymentsRecorded {
        /// Order ID.
        order_id: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::NoLines => write!(f, "Order must contain at least one line"),
            Self::InvalidCharges { message } => {
                write!(f, "Invalid order charges: {message}")
            }
            Self::InsufficientDeposit { required, offered } => {
                write!(f, "Deposit {offered} is below the required {required}")
            }
            Self::OverPayment { due, offered } => {
                write!(f, "Payment {offered} exceeds outstanding balance {due}")
            }
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Invalid order transition: {from} -> {to}: {reason}")
            }
            Self::CannotCancel { status } => {
                write!(f, "Cannot cancel order in status: {status}")
            }
            Self::CancellationWindowExpired {
                order_id,
                window_hours,
            } => {
                write!(
                    f,
                    "Cancellation window of {window_hours}h has expired for order {order_id}"
                )
            }
            Self::NotYetDelivered { status } => {
                write!(
                    f,
                    "Balance can only be collected after delivery (status: {status})"
                )
            }
            Self::AlreadyPaid { order_id } => {
                write!(f, "Order {order_id} is already fully paid")
            }
            Self::Forbidden { action } => {
                write!(f, "Not authorized to {action}")
            }
            Self::NotFound { order_id } => {
                write!(f, "Order not found: {order_id}")
            }
            Self::PaymentsRecorded { order_id } => {
                write!(
                    f,
                    "Order {order_id} has recorded payments and cannot be hard-deleted; cancel it instead"
                )
            }
        }
    }
}

impl std::error::Error for OrderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_deposit_display() {
        let err = OrderError::InsufficientDeposit {
            required: Money::from_cents(7500),
            offered: Money::from_cents(5000),
        };
        let msg = format!("{err}");
        assert!(msg.contains("$50.00"));
        assert!(msg.contains("$75.00"));
    }

    #[test]
    fn window_expired_display() {
        let err = OrderError::CancellationWindowExpired {
            order_id: "ord-1".to_string(),
            window_hours: 24,
        };
        let msg = format!("{err}");
        assert!(msg.contains("24h"));
        assert!(msg.contains("ord-1"));
    }

    #[test]
    fn invalid_transition_display() {
        let err = OrderError::InvalidStateTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Shipped,
            reason: "Order is already delivered".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("DELIVERED"));
        assert!(msg.contains("SHIPPED"));
    }
}
