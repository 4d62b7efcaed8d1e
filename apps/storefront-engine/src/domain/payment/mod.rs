//! Payment Bounded Context
//!
//! Discrete money movements against orders, with a monotone status machine
//! (`Pending -> Processing -> Paid -> Refunded`, `Failed` dead-end) and
//! refund sub-records. The processor itself is an application port.

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod value_objects;

pub use aggregate::{Payment, PaymentKind};
pub use errors::PaymentError;
pub use repository::PaymentRepository;
pub use value_objects::{PaymentMethod, PaymentStatus, Refund, RefundStatus};
