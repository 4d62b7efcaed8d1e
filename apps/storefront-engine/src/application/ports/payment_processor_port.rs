//! Payment Processor Port (Driven Port)
//!
//! Interface to the external payment processor. The engine never talks to a
//! real gateway; the shipped adapter simulates one (configurable approval
//! rate and latency), and every charge runs under a deadline because the
//! modelled network call must stay cancellable.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::payment::value_objects::PaymentMethod;
use crate::domain::shared::{CustomerId, OrderId, PaymentId, Timestamp};

/// Request to charge the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Payment record being settled.
    pub payment_id: PaymentId,
    /// Order the money belongs to.
    pub order_id: OrderId,
    /// Paying customer.
    pub customer_id: CustomerId,
    /// Amount to charge.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
}

/// Acknowledgment from the processor after a successful charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorReceipt {
    /// Processor-assigned reference.
    pub reference: String,
    /// When the processor settled the charge.
    pub processed_at: Timestamp,
}

/// Payment processor error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProcessorError {
    /// Processor declined the charge.
    #[error("Charge declined: {reason}")]
    Declined {
        /// Decline reason.
        reason: String,
    },

    /// Processor unreachable.
    #[error("Processor unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The charge attempt exceeded its deadline.
    #[error("Charge timed out after {timeout_ms}ms")]
    TimedOut {
        /// Deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },
}

/// Port for payment processor interactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProcessorPort: Send + Sync {
    /// Attempt to charge the customer.
    async fn charge(&self, request: ChargeRequest) -> Result<ProcessorReceipt, ProcessorError>;
}

/// Run a charge under a deadline.
///
/// An attempt that outlives `deadline` is dropped (the future is cancelled)
/// and surfaces as `TimedOut`.
///
/// # Errors
///
/// Returns the processor's error, or `TimedOut` when the deadline elapses.
pub async fn charge_with_deadline<X: PaymentProcessorPort + ?Sized>(
    processor: &X,
    request: ChargeRequest,
    deadline: Duration,
) -> Result<ProcessorReceipt, ProcessorError> {
    match tokio::time::timeout(deadline, processor.charge(request)).await {
        Ok(result) => result,
        Err(_) => Err(ProcessorError::TimedOut {
            timeout_ms: deadline.as_millis() as u64,
        }),
    }
}
