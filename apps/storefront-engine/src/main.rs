//! Storefront Engine Binary
//!
//! Starts the storefront order-processing engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin storefront-engine
//! ```
//!
//! # Environment Variables
//!
//! - `HTTP_PORT`: HTTP server port (default: 8080)
//! - `CONFIG_PATH`: Path to config.yaml (default: config.yaml, optional)
//! - `PAYMENT_SUCCESS_RATE`: Mock processor approval probability override
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use storefront_engine::application::use_cases::{
    CancelOrderUseCase, CompletePaymentUseCase, DeleteOrderUseCase, ManageCartUseCase,
    PlaceOrderUseCase, SalesReportUseCase, UpdateOrderStatusUseCase,
};
use storefront_engine::config::{Config, load_config};
use storefront_engine::infrastructure::http::{AppState, create_router};
use storefront_engine::infrastructure::notification::LogNotifier;
use storefront_engine::infrastructure::payment::MockPaymentProcessor;
use storefront_engine::infrastructure::persistence::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryPaymentRepository,
    InMemoryProductRepository,
};
use tokio::net::TcpListener;
use tokio::signal;

/// Concrete type alias for the place order use case.
type ConcretePlaceOrderUseCase = PlaceOrderUseCase<
    InMemoryProductRepository,
    InMemoryCartRepository,
    InMemoryOrderRepository,
    InMemoryPaymentRepository,
    MockPaymentProcessor,
    LogNotifier,
>;

/// Concrete type alias for the cancel order use case.
type ConcreteCancelOrderUseCase = CancelOrderUseCase<
    InMemoryProductRepository,
    InMemoryOrderRepository,
    InMemoryPaymentRepository,
    LogNotifier,
>;

/// Application state alias used by the HTTP router.
type EngineState = AppState<
    InMemoryProductRepository,
    InMemoryCartRepository,
    InMemoryOrderRepository,
    InMemoryPaymentRepository,
    MockPaymentProcessor,
    LogNotifier,
>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting Storefront Engine");

    let config = parse_config()?;
    log_config(&config);

    let state = create_state(&config);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /api/v1/products");
    tracing::info!("  GET    /api/v1/cart");
    tracing::info!("  POST   /api/v1/cart/items");
    tracing::info!("  POST   /api/v1/cart/merge");
    tracing::info!("  POST   /api/v1/orders");
    tracing::info!("  POST   /api/v1/orders/{{id}}/cancel");
    tracing::info!("  POST   /api/v1/orders/{{id}}/complete-payment");
    tracing::info!("  PUT    /api/v1/orders/{{id}}/status");
    tracing::info!("  GET    /api/v1/reports/monthly-sales");

    let listener = TcpListener::bind(addr).await?;
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Storefront engine stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses static directive strings that are compile-time constants guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "storefront_engine=info"
                    .parse()
                    .expect("static directive 'storefront_engine=info' is valid"),
            ),
        )
        .init();
}

/// Load configuration and apply environment-variable overrides.
fn parse_config() -> Result<Config, Box<dyn std::error::Error>> {
    let path = std::env::var("CONFIG_PATH").ok();
    let mut config = load_config(path.as_deref())?;

    if let Ok(port) = std::env::var("HTTP_PORT") {
        config.server.http_port = port.parse().unwrap_or(config.server.http_port);
    }
    if let Ok(rate) = std::env::var("PAYMENT_SUCCESS_RATE") {
        if let Ok(rate) = rate.parse::<f64>() {
            config.payments.success_rate = rate.clamp(0.0, 1.0);
        }
    }

    config.validate()?;
    Ok(config)
}

/// Log the effective configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        deposit_fraction = %config.checkout.deposit_fraction,
        cancellation_window_hours = config.checkout.cancellation_window_hours,
        payment_success_rate = config.payments.success_rate,
        "Configuration loaded"
    );
}

/// Wire repositories, adapters, and use cases together.
fn create_state(config: &Config) -> EngineState {
    let products = Arc::new(InMemoryProductRepository::new());
    let carts = Arc::new(InMemoryCartRepository::new());
    let orders = Arc::new(InMemoryOrderRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());
    let processor = Arc::new(MockPaymentProcessor::from_config(&config.payments));
    let notifier = Arc::new(LogNotifier::new());

    let manage_cart = Arc::new(ManageCartUseCase::new(
        Arc::clone(&products),
        Arc::clone(&carts),
    ));

    let place_order: Arc<ConcretePlaceOrderUseCase> = Arc::new(PlaceOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&carts),
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::clone(&processor),
        Arc::clone(&notifier),
        config.checkout.clone(),
        config.payments.clone(),
    ));

    let cancel_order: Arc<ConcreteCancelOrderUseCase> = Arc::new(CancelOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::clone(&notifier),
        config.checkout.clone(),
    ));

    let complete_payment = Arc::new(CompletePaymentUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::clone(&processor),
        Arc::clone(&notifier),
        config.payments.clone(),
    ));

    let update_status = Arc::new(UpdateOrderStatusUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&notifier),
        Arc::clone(&cancel_order),
    ));

    let delete_order = Arc::new(DeleteOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::clone(&payments),
    ));

    let sales_report = Arc::new(SalesReportUseCase::new(Arc::clone(&orders)));

    AppState {
        manage_cart,
        place_order,
        cancel_order,
        complete_payment,
        update_status,
        delete_order,
        sales_report,
        products,
        orders,
        payments,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed: without them the process
/// cannot respond to termination signals, and failing fast at startup beats
/// an unresponsive process.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    tracing::info!("Graceful shutdown started");
}
