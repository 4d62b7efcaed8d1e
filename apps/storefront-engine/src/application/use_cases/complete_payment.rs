//! Complete Payment Use Case
//!
//! Collects the outstanding balance once an order is delivered.

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::application::error::ServiceError;
use crate::application::ports::{
    ChargeRequest, NotifierPort, PaymentProcessorPort, charge_with_deadline,
};
use crate::config::PaymentsConfig;
use crate::domain::ordering::events::OrderEvent;
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::payment::{Payment, PaymentMethod, PaymentRepository};
use crate::domain::shared::{Actor, OrderId};

/// Use case for collecting the delivery-time balance.
pub struct CompletePaymentUseCase<O, Y, X, N>
where
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    orders: Arc<O>,
    payments: Arc<Y>,
    processor: Arc<X>,
    notifier: Arc<N>,
    payment_settings: PaymentsConfig,
}

impl<O, Y, X, N> CompletePaymentUseCase<O, Y, X, N>
where
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    /// Create a new CompletePaymentUseCase.
    pub fn new(
        orders: Arc<O>,
        payments: Arc<Y>,
        processor: Arc<X>,
        notifier: Arc<N>,
        payment_settings: PaymentsConfig,
    ) -> Self {
        Self {
            orders,
            payments,
            processor,
            notifier,
            payment_settings,
        }
    }

    /// Execute the use case.
    ///
    /// Fails with `NotYetDelivered` before delivery and `AlreadyPaid` when
    /// nothing is outstanding; otherwise charges exactly the outstanding
    /// balance and zeroes it.
    pub async fn execute(
        &self,
        actor: &Actor,
        order_id: &OrderId,
        method: PaymentMethod,
    ) -> Result<OrderDto, ServiceError> {
        let mut order =
            self.orders
                .find_by_id(order_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    order_id: order_id.as_str().to_string(),
                })?;

        if !actor.can_act_for(order.customer_id()) {
            return Err(OrderError::Forbidden {
                action: format!("complete payment for order {order_id}"),
            }
            .into());
        }

        let due = order.collectable_balance()?;

        let mut payment = Payment::balance(
            order.id().clone(),
            order.customer_id().clone(),
            due,
            method,
        )?;
        payment.begin_processing()?;

        let request = ChargeRequest {
            payment_id: payment.id().clone(),
            order_id: payment.order_id().clone(),
            customer_id: payment.customer_id().clone(),
            amount: payment.amount().amount(),
            method: payment.method(),
        };
        match charge_with_deadline(
            self.processor.as_ref(),
            request,
            self.payment_settings.timeout(),
        )
        .await
        {
            Ok(receipt) => payment.mark_paid(receipt.reference)?,
            Err(processor_error) => {
                if let Err(e) = payment.mark_failed(processor_error.to_string()) {
                    tracing::error!(error = %e, "Failed to record payment failure");
                }
                if let Err(e) = self.payments.save(&payment).await {
                    tracing::error!(error = %e, "Failed to save declined payment");
                }
                return Err(processor_error.into());
            }
        }

        order.record_balance_payment(payment.id().clone(), due)?;

        self.payments.save(&payment).await?;
        self.orders.save(&order).await?;
        self.publish(order.drain_events()).await;

        Ok(OrderDto::from_order(&order))
    }

    async fn publish(&self, events: Vec<OrderEvent>) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.notifier.publish_order_events(events).await {
            tracing::warn!(error = %e, "Failed to publish order events");
        }
    }
}
