//! Payment status in the money-movement lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of one money movement.
///
/// Transitions are monotone forward: `Pending -> Processing -> Paid ->
/// Refunded`, with `Failed` a dead end reachable from `Pending`/`Processing`
/// and `Disputed` reachable from `Paid`. A payment never leaves `Refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created, not yet handed to the processor.
    Pending,
    /// Handed to the processor, awaiting the outcome.
    Processing,
    /// Processor confirmed the charge.
    Paid,
    /// Processor declined or the charge timed out.
    Failed,
    /// Money returned to the customer.
    Refunded,
    /// Customer raised a dispute after paying.
    Disputed,
}

impl PaymentStatus {
    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Refunded | Self::Disputed)
    }

    /// Returns true if the money actually moved to the merchant.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Returns true if money has moved in either direction.
    ///
    /// Gates hard deletion of the owning order.
    #[must_use]
    pub const fn money_moved(&self) -> bool {
        matches!(
            self,
            Self::Processing | Self::Paid | Self::Refunded | Self::Disputed
        )
    }

    /// Returns true if `self -> to` is a legal forward transition.
    #[must_use]
    pub const fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Processing | Self::Failed)
                | (Self::Processing, Self::Paid | Self::Failed)
                | (Self::Paid, Self::Refunded | Self::Disputed)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Paid => write!(f, "PAID"),
            Self::Failed => write!(f, "FAILED"),
            Self::Refunded => write!(f, "REFUNDED"),
            Self::Disputed => write!(f, "DISPUTED"),
        }
    }
}
