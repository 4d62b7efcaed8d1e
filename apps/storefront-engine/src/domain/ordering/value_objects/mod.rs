//! Ordering value objects.

mod cancellation;
mod charges;
mod order_number;
mod order_status;
mod shipping_address;

pub use cancellation::CancelReason;
pub use charges::Charges;
pub use order_number::OrderNumber;
pub use order_status::OrderStatus;
pub use shipping_address::ShippingAddress;
