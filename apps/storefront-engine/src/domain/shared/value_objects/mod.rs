//! Shared value objects.

mod actor;
mod identifiers;
mod money;
mod quantity;
mod timestamp;

pub use actor::{Actor, Role};
pub use identifiers::{CartId, CustomerId, OrderId, PaymentId, ProductId};
pub use money::Money;
pub use quantity::Quantity;
pub use timestamp::Timestamp;
