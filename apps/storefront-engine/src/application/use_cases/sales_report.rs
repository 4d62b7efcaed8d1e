//! Sales Report Use Case (admin)
//!
//! Read-only monthly projection over orders. An order counts as a sale when
//! its full total has been collected (`payment_due == 0`) and it was not
//! cancelled or returned; buckets group by the placement month.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::dto::MonthlySalesDto;
use crate::application::error::ServiceError;
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::shared::{Actor, Money};

/// Use case for the monthly sales projection.
pub struct SalesReportUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
}

impl<O> SalesReportUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new SalesReportUseCase.
    pub fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    /// Execute the use case. Months come back in chronological order.
    pub async fn execute(&self, actor: &Actor) -> Result<Vec<MonthlySalesDto>, ServiceError> {
        if !actor.is_admin() {
            return Err(OrderError::Forbidden {
                action: "read the sales report".to_string(),
            }
            .into());
        }

        let mut buckets: BTreeMap<(i32, u32), (u64, Money)> = BTreeMap::new();
        for order in self.orders.find_all().await? {
            if !Self::counts_as_sale(&order) {
                continue;
            }
            let key = (order.created_at().year(), order.created_at().month());
            let entry = buckets.entry(key).or_insert((0, Money::ZERO));
            entry.0 += 1;
            entry.1 = entry.1 + order.charges().total();
        }

        Ok(buckets
            .into_iter()
            .map(|((year, month), (orders, total))| MonthlySalesDto {
                year,
                month,
                orders,
                total: total.amount(),
            })
            .collect())
    }

    fn counts_as_sale(order: &crate::domain::ordering::Order) -> bool {
        order.payment_due().is_zero()
            && !matches!(
                order.status(),
                OrderStatus::Cancelled | OrderStatus::Returned
            )
    }
}
