//! Ordering Bounded Context
//!
//! The central aggregate of the engine: order placement under the
//! upfront-deposit model, fulfilment-status progression, the cancellation
//! window, and balance collection on delivery.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: line snapshots, derived charges, outstanding
//!   balance, lifecycle transitions
//! - **Deposit model**: at least half the total is collected at placement;
//!   the remainder (`payment_due`) on delivery
//! - **Domain Events**: capture placements, deliveries, cancellations, and
//!   payment completion for the notification collaborator

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{Order, OrderLine, PlaceOrderCommand};
pub use errors::OrderError;
pub use events::{
    OrderCancelled, OrderDelivered, OrderEvent, OrderPaymentCompleted, OrderPlaced,
};
pub use repository::OrderRepository;
pub use services::OrderStateMachine;
pub use value_objects::{CancelReason, Charges, OrderNumber, OrderStatus, ShippingAddress};
