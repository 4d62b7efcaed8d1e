//! Data transfer objects for the API boundary.

mod cart_dto;
mod order_dto;

pub use cart_dto::{CartDto, CartLineDto};
pub use order_dto::{ChargesDto, MonthlySalesDto, OrderDto, OrderLineDto, PaymentDto, RefundDto};
