//! Order Aggregate Root
//!
//! Manages the order lifecycle under the upfront-deposit model: placement
//! with at least half the total paid, fulfilment-status progression, the
//! 24-hour cancellation window, and collection of the remaining balance on
//! delivery.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderLine;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::events::{
    OrderCancelled, OrderDelivered, OrderEvent, OrderPaymentCompleted, OrderPlaced,
};
use crate::domain::ordering::services::OrderStateMachine;
use crate::domain::ordering::value_objects::{
    CancelReason, Charges, OrderNumber, OrderStatus, ShippingAddress,
};
use crate::domain::shared::{CustomerId, Money, OrderId, PaymentId, Timestamp};

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Line snapshots (from a materialized cart or a direct item list).
    pub lines: Vec<OrderLine>,
    /// Shipping destination.
    pub shipping_address: ShippingAddress,
    /// Derived money fields.
    pub charges: Charges,
    /// Deposit the caller intends to pay now.
    pub deposit: Money,
    /// Minimum deposit as a fraction of the total (policy, typically 0.5).
    pub min_deposit_fraction: Decimal,
}

impl PlaceOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns error if lines are missing, charges are inconsistent with the
    /// lines, the address is incomplete, or the deposit violates policy.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::NoLines);
        }

        self.shipping_address.validate()?;

        let line_total: Money = self.lines.iter().map(OrderLine::line_total).sum();
        if line_total != self.charges.items() {
            return Err(OrderError::InvalidCharges {
                message: format!(
                    "Item charge {} does not match line totals {line_total}",
                    self.charges.items()
                ),
            });
        }

        self.deposit
            .validate_payment()
            .map_err(|e| OrderError::InvalidParameters {
                field: "deposit".to_string(),
                message: e.to_string(),
            })?;

        let required = self.charges.total().fraction(self.min_deposit_fraction);
        if self.deposit < required {
            return Err(OrderError::InsufficientDeposit {
                required,
                offered: self.deposit,
            });
        }
        if self.deposit > self.charges.total() {
            return Err(OrderError::OverPayment {
                due: self.charges.total(),
                offered: self.deposit,
            });
        }

        Ok(())
    }
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    customer_id: CustomerId,
    lines: Vec<OrderLine>,
    shipping_address: ShippingAddress,
    charges: Charges,
    payment_due: Money,
    status: OrderStatus,
    confirmed: bool,
    payment_ids: Vec<PaymentId>,
    delivered_at: Option<Timestamp>,
    canceled_at: Option<Timestamp>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Place a new order.
    ///
    /// The order starts `Pending` with the full total outstanding; it is
    /// confirmed once the deposit charge succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn place(cmd: PlaceOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::generate(),
            order_number: OrderNumber::generate(),
            customer_id: cmd.customer_id,
            lines: cmd.lines,
            shipping_address: cmd.shipping_address,
            charges: cmd.charges,
            payment_due: cmd.charges.total(),
            status: OrderStatus::Pending,
            confirmed: false,
            payment_ids: Vec::new(),
            delivered_at: None,
            canceled_at: None,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the customer-facing order number.
    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    /// Get the owning customer's ID.
    #[must_use]
    pub const fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Get the order lines.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Get the shipping destination.
    #[must_use]
    pub const fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    /// Get the money breakdown.
    #[must_use]
    pub const fn charges(&self) -> Charges {
        self.charges
    }

    /// Get the outstanding balance.
    #[must_use]
    pub const fn payment_due(&self) -> Money {
        self.payment_due
    }

    /// Amount collected so far.
    #[must_use]
    pub fn amount_paid(&self) -> Money {
        self.charges.total() - self.payment_due
    }

    /// Get the current fulfilment status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns true once the deposit charge has succeeded.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Payments recorded against this order, oldest first.
    #[must_use]
    pub fn payment_ids(&self) -> &[PaymentId] {
        &self.payment_ids
    }

    /// When the order was delivered, if it has been.
    #[must_use]
    pub const fn delivered_at(&self) -> Option<Timestamp> {
        self.delivered_at
    }

    /// When the order was cancelled, if it has been.
    #[must_use]
    pub const fn canceled_at(&self) -> Option<Timestamp> {
        self.canceled_at
    }

    /// Get the creation timestamp (anchor of the cancellation window).
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Confirm the order after the deposit charge succeeded.
    ///
    /// Moves `Pending -> Processing`, reduces the outstanding balance, and
    /// generates an `OrderPlaced` event (plus `PaymentCompleted` when the
    /// deposit covered the full total).
    ///
    /// # Errors
    ///
    /// Returns error if the order is not awaiting confirmation or the amount
    /// exceeds the outstanding balance.
    pub fn confirm_deposit(
        &mut self,
        payment_id: PaymentId,
        amount: Money,
    ) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending || self.confirmed {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::Processing,
                reason: "Order is not awaiting deposit confirmation".to_string(),
            });
        }
        if amount > self.payment_due {
            return Err(OrderError::OverPayment {
                due: self.payment_due,
                offered: amount,
            });
        }

        self.payment_due = self.payment_due - amount;
        self.payment_ids.push(payment_id);
        self.confirmed = true;
        self.status = OrderStatus::Processing;
        self.touch();

        self.events.push(OrderEvent::Placed(OrderPlaced {
            order_id: self.id.clone(),
            order_number: self.order_number.clone(),
            customer_id: self.customer_id.clone(),
            total: self.charges.total(),
            deposit: amount,
            occurred_at: self.updated_at,
        }));
        if self.payment_due.is_zero() {
            self.events
                .push(OrderEvent::PaymentCompleted(OrderPaymentCompleted {
                    order_id: self.id.clone(),
                    customer_id: self.customer_id.clone(),
                    total: self.charges.total(),
                    occurred_at: self.updated_at,
                }));
        }

        Ok(())
    }

    /// The balance available for collection.
    ///
    /// # Errors
    ///
    /// Returns `NotYetDelivered` unless the order is delivered, or
    /// `AlreadyPaid` when nothing is outstanding.
    pub fn collectable_balance(&self) -> Result<Money, OrderError> {
        if self.status != OrderStatus::Delivered {
            return Err(OrderError::NotYetDelivered {
                status: self.status,
            });
        }
        if self.payment_due.is_zero() {
            return Err(OrderError::AlreadyPaid {
                order_id: self.id.as_str().to_string(),
            });
        }
        Ok(self.payment_due)
    }

    /// Record the balance payment collected after delivery.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not delivered, already settled, or the
    /// amount exceeds the outstanding balance.
    pub fn record_balance_payment(
        &mut self,
        payment_id: PaymentId,
        amount: Money,
    ) -> Result<(), OrderError> {
        self.collectable_balance()?;
        self.apply_payment(payment_id, amount)?;
        self.touch();
        Ok(())
    }

    /// Cancel the order.
    ///
    /// Only legal in a non-terminal status and within `window` of
    /// `created_at`. The caller is responsible for the authorization check,
    /// the inventory release, and the refund arithmetic; the aggregate
    /// records the transition and raises the event.
    ///
    /// # Errors
    ///
    /// Returns error if the order cannot be cancelled or the window closed.
    pub fn cancel(
        &mut self,
        at: Timestamp,
        window: chrono::Duration,
        reason: CancelReason,
    ) -> Result<(), OrderError> {
        if !self.status.is_cancelable() {
            return Err(OrderError::CannotCancel {
                status: self.status,
            });
        }
        if at.duration_since(self.created_at) > window {
            return Err(OrderError::CancellationWindowExpired {
                order_id: self.id.as_str().to_string(),
                window_hours: window.num_hours(),
            });
        }

        self.status = OrderStatus::Cancelled;
        self.canceled_at = Some(at);
        self.touch();

        self.events.push(OrderEvent::Cancelled(OrderCancelled {
            order_id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            reason,
            occurred_at: at,
        }));

        Ok(())
    }

    /// Transition the fulfilment status (admin path).
    ///
    /// Cancellation is excluded here: it carries inventory and refund side
    /// effects and must go through [`Order::cancel`].
    ///
    /// # Errors
    ///
    /// Returns error for transitions the state machine forbids.
    pub fn transition(&mut self, to: OrderStatus, at: Timestamp) -> Result<(), OrderError> {
        if to == OrderStatus::Cancelled {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to,
                reason: "Cancellation must go through the cancel routine".to_string(),
            });
        }
        OrderStateMachine::validate_transition(self.status, to)?;

        self.status = to;
        self.touch();

        if to == OrderStatus::Delivered {
            self.delivered_at = Some(at);
            self.events.push(OrderEvent::Delivered(OrderDelivered {
                order_id: self.id.clone(),
                customer_id: self.customer_id.clone(),
                occurred_at: at,
            }));
        }

        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Drain accumulated domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }

    // ========================================================================
    // Private Helpers
    // ========================================================================

    fn apply_payment(&mut self, payment_id: PaymentId, amount: Money) -> Result<(), OrderError> {
        if amount > self.payment_due {
            return Err(OrderError::OverPayment {
                due: self.payment_due,
                offered: amount,
            });
        }
        self.payment_due = self.payment_due - amount;
        self.payment_ids.push(payment_id);

        if self.payment_due.is_zero() {
            self.events
                .push(OrderEvent::PaymentCompleted(OrderPaymentCompleted {
                    order_id: self.id.clone(),
                    customer_id: self.customer_id.clone(),
                    total: self.charges.total(),
                    occurred_at: Timestamp::now(),
                }));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
