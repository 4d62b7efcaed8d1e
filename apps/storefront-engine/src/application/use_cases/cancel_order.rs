//! Cancel Order Use Case
//!
//! The single cancellation routine. Both the customer-facing cancel
//! endpoint and the admin status-update path land here, so the inventory
//! release and refund side effects cannot diverge; the actor parameter
//! affects authorization only, never the window.

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::application::error::ServiceError;
use crate::application::ports::NotifierPort;
use crate::domain::catalog::ProductRepository;
use crate::domain::ordering::events::OrderEvent;
use crate::domain::ordering::value_objects::{CancelReason, OrderStatus};
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::payment::PaymentRepository;
use crate::config::CheckoutConfig;
use crate::domain::shared::{Actor, OrderId, Timestamp};

/// Use case for cancelling orders.
pub struct CancelOrderUseCase<P, O, Y, N>
where
    P: ProductRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    N: NotifierPort,
{
    products: Arc<P>,
    orders: Arc<O>,
    payments: Arc<Y>,
    notifier: Arc<N>,
    checkout: CheckoutConfig,
}

impl<P, O, Y, N> CancelOrderUseCase<P, O, Y, N>
where
    P: ProductRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    N: NotifierPort,
{
    /// Create a new CancelOrderUseCase.
    pub fn new(
        products: Arc<P>,
        orders: Arc<O>,
        payments: Arc<Y>,
        notifier: Arc<N>,
        checkout: CheckoutConfig,
    ) -> Self {
        Self {
            products,
            orders,
            payments,
            notifier,
            checkout,
        }
    }

    /// Execute the use case.
    ///
    /// Idempotent under retry: cancelling an already-cancelled order returns
    /// the current state without restocking or refunding again.
    pub async fn execute(
        &self,
        actor: &Actor,
        order_id: &OrderId,
        reason: CancelReason,
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
                action: format!("cancel order {order_id}"),
            }
            .into());
        }

        if order.status() == OrderStatus::Cancelled {
            return Ok(OrderDto::from_order(&order));
        }

        order.cancel(
            Timestamp::now(),
            self.checkout.cancellation_window(),
            reason.clone(),
        )?;

        // Return every reserved unit to the shelf.
        for line in order.lines() {
            match self.products.find_by_id(line.product_id()).await {
                Ok(Some(mut product)) => {
                    product.release(line.quantity());
                    if let Err(e) = self.products.save(&product).await {
                        tracing::error!(
                            product_id = %line.product_id(),
                            error = %e,
                            "Failed to persist release on cancellation"
                        );
                    }
                }
                Ok(None) => {
                    tracing::warn!(
                        product_id = %line.product_id(),
                        "Product vanished before cancellation release"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        product_id = %line.product_id(),
                        error = %e,
                        "Failed to load product for cancellation release"
                    );
                }
            }
        }

        // Refund every settled payment, minus the cancellation fee.
        let refund_fraction = self.checkout.refund_fraction();
        let mut payments = self.payments.find_by_order(order_id).await?;
        for payment in &mut payments {
            if !payment.status().is_paid() {
                continue;
            }
            let refund_amount = payment.amount().fraction(refund_fraction);
            payment.refund(refund_amount, reason.message.clone())?;
            self.payments.save(payment).await?;
        }

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
