//! Infrastructure Layer
//!
//! Adapters implementing the domain repositories and application ports:
//! in-memory persistence, the simulated payment processor, the logging
//! notifier, and the HTTP controller.

pub mod http;
pub mod notification;
pub mod payment;
pub mod persistence;
