//! Mock payment processor adapter.
//!
//! Simulates an external gateway without network calls: a configurable
//! approval probability and an artificial latency standing in for the wire
//! round-trip. Tests pin the probability to 1.0 or 0.0 (and drop the
//! latency) for deterministic behavior.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::application::ports::{
    ChargeRequest, PaymentProcessorPort, ProcessorError, ProcessorReceipt,
};
use crate::config::PaymentsConfig;
use crate::domain::shared::Timestamp;

/// Mock payment processor.
#[derive(Debug, Clone)]
pub struct MockPaymentProcessor {
    success_rate: f64,
    latency: Duration,
}

impl MockPaymentProcessor {
    /// Create a processor with an explicit approval probability and latency.
    ///
    /// The probability is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(success_rate: f64, latency: Duration) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            latency,
        }
    }

    /// Create a processor from configuration.
    #[must_use]
    pub fn from_config(config: &PaymentsConfig) -> Self {
        Self::new(config.success_rate, config.latency())
    }

    /// A processor that approves every charge instantly.
    #[must_use]
    pub fn always_approve() -> Self {
        Self::new(1.0, Duration::ZERO)
    }

    /// A processor that declines every charge instantly.
    #[must_use]
    pub fn always_decline() -> Self {
        Self::new(0.0, Duration::ZERO)
    }
}

impl Default for MockPaymentProcessor {
    fn default() -> Self {
        Self::from_config(&PaymentsConfig::default())
    }
}

#[async_trait]
impl PaymentProcessorPort for MockPaymentProcessor {
    async fn charge(&self, request: ChargeRequest) -> Result<ProcessorReceipt, ProcessorError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let approved = rand::rng().random_bool(self.success_rate);
        if approved {
            let receipt = ProcessorReceipt {
                reference: format!("mock-{}", uuid::Uuid::new_v4().simple()),
                processed_at: Timestamp::now(),
            };
            tracing::debug!(
                payment_id = %request.payment_id,
                reference = %receipt.reference,
                "Mock processor approved charge"
            );
            Ok(receipt)
        } else {
            tracing::debug!(
                payment_id = %request.payment_id,
                "Mock processor declined charge"
            );
            Err(ProcessorError::Declined {
                reason: "Simulated processor decline".to_string(),
            })
        }
    }
}
