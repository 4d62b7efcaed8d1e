//! Cart Bounded Context
//!
//! Pending line items per owner (registered customer or anonymous session),
//! with guest-to-customer merge at login and materialization into order
//! lines at checkout.

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod value_objects;

pub use aggregate::{Cart, CartLine};
pub use errors::CartError;
pub use repository::CartRepository;
pub use value_objects::CartOwner;
