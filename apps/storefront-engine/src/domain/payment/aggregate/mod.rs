//! Payment aggregates.

mod payment;

pub use payment::{Payment, PaymentKind};
