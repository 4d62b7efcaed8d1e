//! Reasons for order cancellation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason attached to a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelReason {
    /// Cancellation code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl CancelReason {
    /// Create a new cancel reason.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Customer asked to cancel.
    #[must_use]
    pub fn customer_requested() -> Self {
        Self::new("CUSTOMER_REQUESTED", "Cancelled at customer request")
    }

    /// Back-office cancelled through the admin status path.
    #[must_use]
    pub fn admin_action() -> Self {
        Self::new("ADMIN_ACTION", "Cancelled by administrator")
    }

    /// The deposit charge never went through.
    #[must_use]
    pub fn payment_failed() -> Self {
        Self::new("PAYMENT_FAILED", "Deposit payment failed")
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
