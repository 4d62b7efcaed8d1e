//! Application Layer
//!
//! Use cases and port definitions. Orchestrates the domain aggregates,
//! talks to the outside world through ports, and exposes DTOs at the API
//! boundary.

pub mod dto;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::ServiceError;
