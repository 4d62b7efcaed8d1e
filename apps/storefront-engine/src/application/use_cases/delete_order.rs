//! Delete Order Use Case (admin)
//!
//! Hard removal is reserved for orders no money ever moved against; once a
//! payment has left `Pending`/`Failed` the order must be cancelled (refund
//! flow) instead.

use std::sync::Arc;

use crate::application::error::ServiceError;
use crate::domain::catalog::ProductRepository;
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::payment::PaymentRepository;
use crate::domain::shared::{Actor, OrderId};

/// Use case for hard-deleting orders.
pub struct DeleteOrderUseCase<P, O, Y>
where
    P: ProductRepository,
    O: OrderRepository,
    Y: PaymentRepository,
{
    products: Arc<P>,
    orders: Arc<O>,
    payments: Arc<Y>,
}

impl<P, O, Y> DeleteOrderUseCase<P, O, Y>
where
    P: ProductRepository,
    O: OrderRepository,
    Y: PaymentRepository,
{
    /// Create a new DeleteOrderUseCase.
    pub fn new(products: Arc<P>, orders: Arc<O>, payments: Arc<Y>) -> Self {
        Self {
            products,
            orders,
            payments,
        }
    }

    /// Execute the use case.
    ///
    /// Deleting a non-terminal order also releases its outstanding
    /// reservations; payment records of the deleted order are removed with
    /// it.
    pub async fn execute(&self, actor: &Actor, order_id: &OrderId) -> Result<(), ServiceError> {
        if !actor.is_admin() {
            return Err(OrderError::Forbidden {
                action: format!("delete order {order_id}"),
            }
            .into());
        }

        let order =
            self.orders
                .find_by_id(order_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    order_id: order_id.as_str().to_string(),
                })?;

        let payments = self.payments.find_by_order(order_id).await?;
        if payments.iter().any(|p| p.status().money_moved()) {
            return Err(OrderError::PaymentsRecorded {
                order_id: order_id.as_str().to_string(),
            }
            .into());
        }

        if !order.status().is_terminal() {
            for line in order.lines() {
                match self.products.find_by_id(line.product_id()).await {
                    Ok(Some(mut product)) => {
                        product.release(line.quantity());
                        if let Err(e) = self.products.save(&product).await {
                            tracing::error!(
                                product_id = %line.product_id(),
                                error = %e,
                                "Failed to persist release on order deletion"
                            );
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(
                            product_id = %line.product_id(),
                            error = %e,
                            "Failed to load product for deletion release"
                        );
                    }
                }
            }
        }

        for payment in &payments {
            self.payments.delete(payment.id()).await?;
        }
        self.orders.delete(order_id).await?;
        Ok(())
    }
}
