//! Payment value objects.

mod payment_method;
mod payment_status;
mod refund;

pub use payment_method::PaymentMethod;
pub use payment_status::PaymentStatus;
pub use refund::{Refund, RefundStatus};
