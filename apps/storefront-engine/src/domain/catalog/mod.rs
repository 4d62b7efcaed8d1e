//! Catalog Bounded Context
//!
//! Products and the inventory ledger they carry. Reservation and release of
//! stock are the only legal mutators of the `stock`/`sold` counters; batch
//! all-or-nothing semantics over multiple products are the responsibility of
//! the order-placement use case (compensating release on partial failure).

pub mod aggregate;
pub mod errors;
pub mod repository;

pub use aggregate::{CreateProductCommand, Product};
pub use errors::CatalogError;
pub use repository::ProductRepository;
