//! Refund sub-record attached to a refunded payment.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, Timestamp};

/// Status of a refund movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    /// Refund issued to the processor.
    Issued,
    /// Refund confirmed settled.
    Completed,
}

/// The record of money returned against a paid payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Amount returned (may be less than the original payment, e.g. after a
    /// cancellation fee).
    pub amount: Money,
    /// Why the refund was issued.
    pub reason: String,
    /// Settlement status.
    pub status: RefundStatus,
    /// When the refund was issued.
    pub issued_at: Timestamp,
}

impl Refund {
    /// Create a completed refund record.
    #[must_use]
    pub fn completed(amount: Money, reason: impl Into<String>) -> Self {
        Self {
            amount,
            reason: reason.into(),
            status: RefundStatus::Completed,
            issued_at: Timestamp::now(),
        }
    }
}
