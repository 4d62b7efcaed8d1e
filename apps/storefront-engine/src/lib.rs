// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Storefront Engine - Order Processing Core
//!
//! The order, cart, and payment lifecycle engine for the Storefront
//! platform.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `catalog`: Product aggregate carrying the inventory ledger
//!   - `cart`: Cart aggregate with guest/customer ownership and merge
//!   - `payment`: Payment aggregate with a monotone status machine
//!   - `ordering`: Order aggregate, deposit model, lifecycle state machine
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`PaymentProcessorPort`,
//!     `NotifierPort`)
//!   - `use_cases`: `PlaceOrder`, `CancelOrder`, `CompletePayment`,
//!     `UpdateOrderStatus`, `DeleteOrder`, `ManageCart`, `SalesReport`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory document-store repositories
//!   - `payment`: Simulated payment processor
//!   - `notification`: Logging notifier
//!   - `http`: Axum REST controller

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and policy knobs.
pub mod config;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::cart::{Cart, CartLine, CartOwner};
pub use domain::catalog::{CreateProductCommand, Product};
pub use domain::ordering::{
    Order, OrderLine, OrderStateMachine, OrderStatus, PlaceOrderCommand,
};
pub use domain::payment::{Payment, PaymentMethod, PaymentStatus};
pub use domain::shared::{
    Actor, CartId, CustomerId, Money, OrderId, PaymentId, ProductId, Quantity, Role, Timestamp,
};

// Application re-exports
pub use application::ServiceError;
pub use application::dto::{CartDto, MonthlySalesDto, OrderDto, PaymentDto};
pub use application::ports::{NoOpNotifier, NotifierPort, PaymentProcessorPort, ProcessorError};
pub use application::use_cases::{
    CancelOrderUseCase, CompletePaymentUseCase, DeleteOrderUseCase, ManageCartUseCase,
    OrderSource, PlaceOrderRequest, PlaceOrderUseCase, SalesReportUseCase,
    UpdateOrderStatusUseCase,
};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::notification::LogNotifier;
pub use infrastructure::payment::MockPaymentProcessor;
pub use infrastructure::persistence::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryPaymentRepository,
    InMemoryProductRepository,
};
