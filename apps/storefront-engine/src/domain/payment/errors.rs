//! Payment errors.

use std::fmt;

use super::value_objects::PaymentStatus;

/// Errors raised by the payment lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Invalid state transition attempted.
    InvalidTransition {
        /// Current payment status.
        from: PaymentStatus,
        /// Attempted status.
        to: PaymentStatus,
    },

    /// Invalid payment parameters.
    InvalidAmount {
        /// Error message.
        message: String,
    },

    /// Refund requested for more than was paid.
    RefundExceedsPayment {
        /// Amount paid, formatted.
        paid: String,
        /// Amount requested, formatted.
        requested: String,
    },

    /// Payment not found.
    NotFound {
        /// Payment ID.
        payment_id: String,
    },
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "Invalid payment transition: {from} -> {to}")
            }
            Self::InvalidAmount { message } => {
                write!(f, "Invalid payment amount: {message}")
            }
            Self::RefundExceedsPayment { paid, requested } => {
                write!(f, "Refund {requested} exceeds amount paid {paid}")
            }
            Self::NotFound { payment_id } => {
                write!(f, "Payment not found: {payment_id}")
            }
        }
    }
}

impl std::error::Error for PaymentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_display() {
        let err = PaymentError::InvalidTransition {
            from: PaymentStatus::Refunded,
            to: PaymentStatus::Paid,
        };
        let msg = format!("{err}");
        assert!(msg.contains("REFUNDED"));
        assert!(msg.contains("PAID"));
    }

    #[test]
    fn refund_exceeds_display() {
        let err = PaymentError::RefundExceedsPayment {
            paid: "$75.00".to_string(),
            requested: "$80.00".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("$80.00"));
        assert!(msg.contains("$75.00"));
    }
}
