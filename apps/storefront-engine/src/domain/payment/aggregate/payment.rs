//! Payment Aggregate Root
//!
//! One discrete money movement tied to an order: the placement deposit or
//! the balance collected on delivery. Refunds are recorded as a sub-record
//! on the paid payment they reverse.

use serde::{Deserialize, Serialize};

use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::value_objects::{PaymentMethod, PaymentStatus, Refund};
use crate::domain::shared::{CustomerId, Money, OrderId, PaymentId, Timestamp};

/// What stage of the order this payment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Upfront deposit taken at placement (at least half the total).
    Deposit,
    /// Remaining balance collected once the order is delivered.
    Balance,
}

/// Payment Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    order_id: OrderId,
    customer_id: CustomerId,
    kind: PaymentKind,
    method: PaymentMethod,
    amount: Money,
    status: PaymentStatus,
    processor_reference: Option<String>,
    failure_reason: Option<String>,
    refund: Option<Refund>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Payment {
    /// Create the upfront deposit payment for an order.
    ///
    /// # Errors
    ///
    /// Returns error if the amount is not a valid payment amount.
    pub fn deposit(
        order_id: OrderId,
        customer_id: CustomerId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Self, PaymentError> {
        Self::create(order_id, customer_id, PaymentKind::Deposit, amount, method)
    }

    /// Create the delivery-time balance payment for an order.
    ///
    /// # Errors
    ///
    /// Returns error if the amount is not a valid payment amount.
    pub fn balance(
        order_id: OrderId,
        customer_id: CustomerId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Self, PaymentError> {
        Self::create(order_id, customer_id, PaymentKind::Balance, amount, method)
    }

    fn create(
        order_id: OrderId,
        customer_id: CustomerId,
        kind: PaymentKind,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Self, PaymentError> {
        amount
            .validate_payment()
            .map_err(|e| PaymentError::InvalidAmount {
                message: e.to_string(),
            })?;

        let now = Timestamp::now();
        Ok(Self {
            id: PaymentId::generate(),
            order_id,
            customer_id,
            kind,
            method,
            amount,
            status: PaymentStatus::Pending,
            processor_reference: None,
            failure_reason: None,
            refund: None,
            created_at: now,
            updated_at: now,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the payment ID.
    #[must_use]
    pub const fn id(&self) -> &PaymentId {
        &self.id
    }

    /// Get the owning order ID.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Get the paying customer's ID.
    #[must_use]
    pub const fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Get the payment kind.
    #[must_use]
    pub const fn kind(&self) -> PaymentKind {
        self.kind
    }

    /// Get the payment method.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Get the amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Get the processor's reference, once paid.
    #[must_use]
    pub fn processor_reference(&self) -> Option<&str> {
        self.processor_reference.as_deref()
    }

    /// Get the failure reason, if the payment failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Get the refund sub-record, if refunded.
    #[must_use]
    pub const fn refund_record(&self) -> Option<&Refund> {
        self.refund.as_ref()
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Hand the payment to the processor.
    ///
    /// # Errors
    ///
    /// Returns error unless the payment is `Pending`.
    pub fn begin_processing(&mut self) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Processing)
    }

    /// Record a successful charge.
    ///
    /// # Errors
    ///
    /// Returns error unless the payment is `Processing`.
    pub fn mark_paid(&mut self, reference: impl Into<String>) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Paid)?;
        self.processor_reference = Some(reference.into());
        Ok(())
    }

    /// Record a decline or timeout. Dead end.
    ///
    /// # Errors
    ///
    /// Returns error unless the payment is `Pending` or `Processing`.
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Failed)?;
        self.failure_reason = Some(reason.into());
        Ok(())
    }

    /// Return money against this payment.
    ///
    /// Only legal from `Paid`; the payment moves to `Refunded` and is never
    /// mutated again.
    ///
    /// # Errors
    ///
    /// Returns error if the payment is not `Paid` or the refund exceeds the
    /// amount paid.
    pub fn refund(
        &mut self,
        amount: Money,
        reason: impl Into<String>,
    ) -> Result<(), PaymentError> {
        if amount > self.amount {
            return Err(PaymentError::RefundExceedsPayment {
                paid: self.amount.to_string(),
                requested: amount.to_string(),
            });
        }
        self.transition(PaymentStatus::Refunded)?;
        self.refund = Some(Refund::completed(amount, reason));
        Ok(())
    }

    /// Flag a paid payment as disputed by the customer.
    ///
    /// # Errors
    ///
    /// Returns error unless the payment is `Paid`.
    pub fn dispute(&mut self) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Disputed)
    }

    fn transition(&mut self, to: PaymentStatus) -> Result<(), PaymentError> {
        if !self.status.can_transition_to(to) {
            return Err(PaymentError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
