//! Update Order Status Use Case (admin)
//!
//! Free movement between non-terminal statuses, delivery stamping, and
//! delegation to the unified cancel routine so the admin path carries the
//! same side effects as the customer path.

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::application::error::ServiceError;
use crate::application::ports::NotifierPort;
use crate::application::use_cases::CancelOrderUseCase;
use crate::domain::catalog::ProductRepository;
use crate::domain::ordering::events::OrderEvent;
use crate::domain::ordering::value_objects::{CancelReason, OrderStatus};
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::payment::PaymentRepository;
use crate::domain::shared::{Actor, OrderId, Timestamp};

/// Use case for admin status transitions.
pub struct UpdateOrderStatusUseCase<P, O, Y, N>
where
    P: ProductRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    N: NotifierPort,
{
    orders: Arc<O>,
    notifier: Arc<N>,
    cancel_order: Arc<CancelOrderUseCase<P, O, Y, N>>,
}

impl<P, O, Y, N> UpdateOrderStatusUseCase<P, O, Y, N>
where
    P: ProductRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    N: NotifierPort,
{
    /// Create a new UpdateOrderStatusUseCase.
    pub fn new(
        orders: Arc<O>,
        notifier: Arc<N>,
        cancel_order: Arc<CancelOrderUseCase<P, O, Y, N>>,
    ) -> Self {
        Self {
            orders,
            notifier,
            cancel_order,
        }
    }

    /// Execute the use case.
    pub async fn execute(
        &self,
        actor: &Actor,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<OrderDto, ServiceError> {
        if !actor.is_admin() {
            return Err(OrderError::Forbidden {
                action: format!("update status of order {order_id}"),
            }
            .into());
        }

        // Cancellation carries inventory and refund side effects; route it
        // through the one cancellation routine.
        if new_status == OrderStatus::Cancelled {
            return self
                .cancel_order
                .execute(actor, order_id, CancelReason::admin_action())
                .await;
        }

        let mut order =
            self.orders
                .find_by_id(order_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    order_id: order_id.as_str().to_string(),
                })?;

        order.transition(new_status, Timestamp::now())?;

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
