//! Persistence adapters.

mod in_memory;

pub use in_memory::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryPaymentRepository,
    InMemoryProductRepository,
};
