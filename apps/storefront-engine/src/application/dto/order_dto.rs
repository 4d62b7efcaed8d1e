//! Order and payment DTOs for the API boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::ordering::{Order, OrderLine};
use crate::domain::payment::aggregate::PaymentKind;
use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};

/// One order line, as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineDto {
    /// Referenced product.
    pub product_id: String,
    /// Name snapshot.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// Line total.
    pub line_total: Decimal,
}

/// Money breakdown of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargesDto {
    /// Item subtotal.
    pub items: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Shipping amount.
    pub shipping: Decimal,
    /// Grand total.
    pub total: Decimal,
}

/// An order, as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub id: String,
    /// Customer-facing order number.
    pub order_number: String,
    /// Owning customer.
    pub customer_id: String,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Line snapshots.
    pub lines: Vec<OrderLineDto>,
    /// Money breakdown.
    pub charges: ChargesDto,
    /// Outstanding balance.
    pub payment_due: Decimal,
    /// Amount collected so far.
    pub amount_paid: Decimal,
    /// True once the deposit charge succeeded.
    pub confirmed: bool,
    /// Delivery time, if delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<String>,
    /// Cancellation time, if cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<String>,
    /// Placement time.
    pub created_at: String,
}

impl OrderDto {
    /// Build a DTO from the aggregate.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().as_str().to_string(),
            order_number: order.order_number().as_str().to_string(),
            customer_id: order.customer_id().as_str().to_string(),
            status: order.status(),
            lines: order.lines().iter().map(line_dto).collect(),
            charges: ChargesDto {
                items: order.charges().items().amount(),
                tax: order.charges().tax().amount(),
                shipping: order.charges().shipping().amount(),
                total: order.charges().total().amount(),
            },
            payment_due: order.payment_due().amount(),
            amount_paid: order.amount_paid().amount(),
            confirmed: order.is_confirmed(),
            delivered_at: order.delivered_at().map(|t| t.to_rfc3339()),
            canceled_at: order.canceled_at().map(|t| t.to_rfc3339()),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

fn line_dto(line: &OrderLine) -> OrderLineDto {
    OrderLineDto {
        product_id: line.product_id().as_str().to_string(),
        name: line.name().to_string(),
        quantity: line.quantity().value(),
        unit_price: line.unit_price().amount(),
        line_total: line.line_total().amount(),
    }
}

/// Refund details on a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundDto {
    /// Amount returned.
    pub amount: Decimal,
    /// Why the refund was issued.
    pub reason: String,
}

/// A payment record, as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDto {
    /// Payment ID.
    pub id: String,
    /// Owning order.
    pub order_id: String,
    /// Deposit or balance.
    pub kind: PaymentKind,
    /// Payment method.
    pub method: PaymentMethod,
    /// Amount.
    pub amount: Decimal,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// Processor reference once paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_reference: Option<String>,
    /// Refund sub-record, if refunded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<RefundDto>,
}

impl PaymentDto {
    /// Build a DTO from the aggregate.
    #[must_use]
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            id: payment.id().as_str().to_string(),
            order_id: payment.order_id().as_str().to_string(),
            kind: payment.kind(),
            method: payment.method(),
            amount: payment.amount().amount(),
            status: payment.status(),
            processor_reference: payment.processor_reference().map(str::to_string),
            refund: payment.refund_record().map(|r| RefundDto {
                amount: r.amount.amount(),
                reason: r.reason.clone(),
            }),
        }
    }
}

/// One month of the sales projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySalesDto {
    /// Calendar year.
    pub year: i32,
    /// Calendar month 1-12.
    pub month: u32,
    /// Orders counted as sales.
    pub orders: u64,
    /// Revenue total.
    pub total: Decimal,
}
