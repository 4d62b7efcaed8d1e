//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure
//! dependencies. This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Events**: Records of state transitions
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`catalog`]: Products and the inventory ledger (stock/sold counters)
//! - [`cart`]: Pending line items per customer or guest session
//! - [`payment`]: Discrete money movements with a monotone status machine
//! - [`ordering`]: The order aggregate and its lifecycle state machine

pub mod cart;
pub mod catalog;
pub mod ordering;
pub mod payment;
pub mod shared;
