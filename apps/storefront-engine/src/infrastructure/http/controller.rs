//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases. Identity is
//! injected by the upstream gateway as `x-user-id`/`x-user-role` headers
//! (guest carts use `x-session-id`); this layer only converts the headers
//! into a principal and maps typed errors onto status codes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};

use crate::application::dto::{CartDto, MonthlySalesDto, OrderDto, PaymentDto};
use crate::application::error::ServiceError;
use crate::application::ports::{NotifierPort, PaymentProcessorPort, ProcessorError};
use crate::application::use_cases::{
    CancelOrderUseCase, CompletePaymentUseCase, DeleteOrderUseCase, DirectItem, ManageCartUseCase,
    OrderSource, PlaceOrderRequest, PlaceOrderUseCase, SalesReportUseCase,
    UpdateOrderStatusUseCase,
};
use crate::domain::cart::{CartError, CartOwner, CartRepository};
use crate::domain::catalog::{CatalogError, CreateProductCommand, Product, ProductRepository};
use crate::domain::ordering::value_objects::{CancelReason, ShippingAddress};
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::payment::{PaymentError, PaymentRepository};
use crate::domain::shared::{Actor, CustomerId, Money, OrderId, ProductId, Quantity, Role};

use super::request::{
    AddItemRequest, CompletePaymentRequest, CreateProductRequest, MergeCartRequest,
    PlaceOrderHttpRequest, RestockRequest, UpdateQuantityRequest, UpdateStatusRequest,
};
use super::response::{ErrorResponse, HealthResponse, ProductResponse};

/// Error tuple returned by handlers.
type ApiError = (StatusCode, Json<ErrorResponse>);

/// Application state shared across handlers.
pub struct AppState<P, C, O, Y, X, N>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    /// Cart operations.
    pub manage_cart: Arc<ManageCartUseCase<P, C>>,
    /// Checkout.
    pub place_order: Arc<PlaceOrderUseCase<P, C, O, Y, X, N>>,
    /// Unified cancellation.
    pub cancel_order: Arc<CancelOrderUseCase<P, O, Y, N>>,
    /// Balance collection.
    pub complete_payment: Arc<CompletePaymentUseCase<O, Y, X, N>>,
    /// Admin status transitions.
    pub update_status: Arc<UpdateOrderStatusUseCase<P, O, Y, N>>,
    /// Admin hard delete.
    pub delete_order: Arc<DeleteOrderUseCase<P, O, Y>>,
    /// Monthly sales projection.
    pub sales_report: Arc<SalesReportUseCase<O>>,
    /// Product repository for catalog queries.
    pub products: Arc<P>,
    /// Order repository for queries.
    pub orders: Arc<O>,
    /// Payment repository for queries.
    pub payments: Arc<Y>,
    /// Application version.
    pub version: String,
}

impl<P, C, O, Y, X, N> Clone for AppState<P, C, O, Y, X, N>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    fn clone(&self) -> Self {
        Self {
            manage_cart: Arc::clone(&self.manage_cart),
            place_order: Arc::clone(&self.place_order),
            cancel_order: Arc::clone(&self.cancel_order),
            complete_payment: Arc::clone(&self.complete_payment),
            update_status: Arc::clone(&self.update_status),
            delete_order: Arc::clone(&self.delete_order),
            sales_report: Arc::clone(&self.sales_report),
            products: Arc::clone(&self.products),
            orders: Arc::clone(&self.orders),
            payments: Arc::clone(&self.payments),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<P, C, O, Y, X, N>(state: AppState<P, C, O, Y, X, N>) -> Router
where
    P: ProductRepository + 'static,
    C: CartRepository + 'static,
    O: OrderRepository + 'static,
    Y: PaymentRepository + 'static,
    X: PaymentProcessorPort + 'static,
    N: NotifierPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/{id}", get(get_product))
        .route("/api/v1/products/{id}/restock", post(restock_product))
        .route("/api/v1/cart", get(get_cart).delete(clear_cart))
        .route("/api/v1/cart/items", post(add_cart_item))
        .route(
            "/api/v1/cart/items/{product_id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route("/api/v1/cart/merge", post(merge_cart))
        .route("/api/v1/orders", post(place_order))
        .route("/api/v1/orders/{id}", get(get_order).delete(delete_order_hard))
        .route("/api/v1/orders/{id}/payments", get(list_order_payments))
        .route("/api/v1/orders/{id}/cancel", post(cancel_order))
        .route(
            "/api/v1/orders/{id}/complete-payment",
            post(complete_payment),
        )
        .route("/api/v1/orders/{id}/status", put(update_order_status))
        .route("/api/v1/reports/monthly-sales", get(monthly_sales))
        .with_state(state)
}

// =============================================================================
// Principal extraction
// =============================================================================

fn header_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// The authenticated principal, from gateway-injected headers.
fn principal(headers: &HeaderMap) -> Result<Actor, ApiError> {
    let id = header_value(headers, "x-user-id").ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("UNAUTHENTICATED", "Missing x-user-id header")),
        )
    })?;
    let role = match header_value(headers, "x-user-role") {
        Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::Customer,
    };
    Ok(Actor::new(CustomerId::new(id), role))
}

/// The cart owner: the authenticated customer, or the anonymous session.
fn cart_owner(headers: &HeaderMap) -> Result<CartOwner, ApiError> {
    if let Some(id) = header_value(headers, "x-user-id") {
        return Ok(CartOwner::customer(CustomerId::new(id)));
    }
    if let Some(session) = header_value(headers, "x-session-id") {
        return Ok(CartOwner::guest(session));
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new(
            "UNAUTHENTICATED",
            "Provide x-user-id or x-session-id",
        )),
    ))
}

// =============================================================================
// Error mapping
// =============================================================================

/// Map a typed error onto its status code and stable error code.
fn api_error(err: &ServiceError) -> ApiError {
    let (status, code) = match err {
        ServiceError::Catalog(e) => match e {
            CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CatalogError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK"),
            CatalogError::ProductInactive { .. } => (StatusCode::BAD_REQUEST, "PRODUCT_INACTIVE"),
            CatalogError::InvalidProduct { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
        },
        ServiceError::Cart(e) => match e {
            CartError::LineNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CartError::EmptyCart { .. } => (StatusCode::BAD_REQUEST, "EMPTY_CART"),
            CartError::InvalidLine { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
        },
        ServiceError::Order(e) => match e {
            OrderError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            OrderError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            OrderError::NoLines
            | OrderError::InvalidParameters { .. }
            | OrderError::InvalidCharges { .. }
            | OrderError::InsufficientDeposit { .. }
            | OrderError::OverPayment { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
            OrderError::CancellationWindowExpired { .. } => {
                (StatusCode::CONFLICT, "CANCELLATION_WINDOW_EXPIRED")
            }
            OrderError::AlreadyPaid { .. } => (StatusCode::CONFLICT, "ALREADY_PAID"),
            OrderError::CannotCancel { .. }
            | OrderError::InvalidStateTransition { .. }
            | OrderError::NotYetDelivered { .. }
            | OrderError::PaymentsRecorded { .. } => (StatusCode::CONFLICT, "STATE_CONFLICT"),
        },
        ServiceError::Payment(e) => match e {
            PaymentError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PaymentError::InvalidAmount { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
            PaymentError::InvalidTransition { .. } | PaymentError::RefundExceedsPayment { .. } => {
                (StatusCode::CONFLICT, "STATE_CONFLICT")
            }
        },
        ServiceError::Processor(e) => match e {
            ProcessorError::Declined { .. } => (StatusCode::PAYMENT_REQUIRED, "PAYMENT_DECLINED"),
            ProcessorError::Unavailable { .. } | ProcessorError::TimedOut { .. } => {
                (StatusCode::BAD_GATEWAY, "PROCESSOR_UNAVAILABLE")
            }
        },
    };
    (status, Json(ErrorResponse::new(code, err.to_string())))
}

fn forbidden(action: &str) -> ApiError {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new(
            "FORBIDDEN",
            format!("Not authorized to {action}"),
        )),
    )
}

fn not_found(what: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", format!("{what} not found"))),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_check<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
) -> Json<HealthResponse>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn list_products<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let products = state
        .products
        .find_active()
        .await
        .map_err(|e| api_error(&e.into()))?;
    Ok(Json(products.iter().map(ProductResponse::from_product).collect()))
}

async fn create_product<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    if !actor.is_admin() {
        return Err(forbidden("create products"));
    }

    let product = Product::new(CreateProductCommand {
        name: request.name,
        unit_price: Money::new(request.unit_price),
        stock: Quantity::new(request.stock),
    })
    .map_err(|e| api_error(&e.into()))?;
    state
        .products
        .save(&product)
        .await
        .map_err(|e| api_error(&e.into()))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from_product(&product))))
}

async fn get_product<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let product = state
        .products
        .find_by_id(&ProductId::new(id))
        .await
        .map_err(|e| api_error(&e.into()))?
        .ok_or_else(|| not_found("Product"))?;
    Ok(Json(ProductResponse::from_product(&product)))
}

async fn restock_product<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RestockRequest>,
) -> Result<Json<ProductResponse>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    if !actor.is_admin() {
        return Err(forbidden("restock products"));
    }

    let mut product = state
        .products
        .find_by_id(&ProductId::new(id))
        .await
        .map_err(|e| api_error(&e.into()))?
        .ok_or_else(|| not_found("Product"))?;
    product.restock(Quantity::new(request.units));
    state
        .products
        .save(&product)
        .await
        .map_err(|e| api_error(&e.into()))?;

    Ok(Json(ProductResponse::from_product(&product)))
}

async fn get_cart<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
) -> Result<Json<CartDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let owner = cart_owner(&headers)?;
    let dto = state
        .manage_cart
        .get(&owner)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn add_cart_item<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartDto>), ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let owner = cart_owner(&headers)?;
    let dto = state
        .manage_cart
        .add_item(
            &owner,
            &ProductId::new(request.product_id),
            Quantity::new(request.quantity),
        )
        .await
        .map_err(|e| api_error(&e))?;
    Ok((StatusCode::CREATED, Json(dto)))
}

async fn update_cart_item<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let owner = cart_owner(&headers)?;
    let dto = state
        .manage_cart
        .update_quantity(
            &owner,
            &ProductId::new(product_id),
            Quantity::new(request.quantity),
        )
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn remove_cart_item<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<CartDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let owner = cart_owner(&headers)?;
    let dto = state
        .manage_cart
        .remove_item(&owner, &ProductId::new(product_id))
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn clear_cart<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let owner = cart_owner(&headers)?;
    state
        .manage_cart
        .clear(&owner)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn merge_cart<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
    Json(request): Json<MergeCartRequest>,
) -> Result<Json<CartDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let dto = state
        .manage_cart
        .merge(actor.id().clone(), &request.guest_session)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn place_order<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
    Json(request): Json<PlaceOrderHttpRequest>,
) -> Result<(StatusCode, Json<OrderDto>), ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;

    let source = match request.items {
        Some(items) if !items.is_empty() => OrderSource::Items(
            items
                .into_iter()
                .map(|i| DirectItem {
                    product_id: ProductId::new(i.product_id),
                    quantity: Quantity::new(i.quantity),
                })
                .collect(),
        ),
        _ => OrderSource::Cart,
    };

    let dto = state
        .place_order
        .execute(
            &actor,
            PlaceOrderRequest {
                source,
                shipping_address: ShippingAddress {
                    recipient: request.shipping_address.recipient,
                    street: request.shipping_address.street,
                    city: request.shipping_address.city,
                    postal_code: request.shipping_address.postal_code,
                    country: request.shipping_address.country,
                },
                method: request.method,
                deposit: Money::new(request.deposit),
            },
        )
        .await
        .map_err(|e| api_error(&e))?;

    Ok((StatusCode::CREATED, Json(dto)))
}

async fn get_order<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OrderDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let order = state
        .orders
        .find_by_id(&OrderId::new(id))
        .await
        .map_err(|e| api_error(&e.into()))?
        .ok_or_else(|| not_found("Order"))?;
    if !actor.can_act_for(order.customer_id()) {
        return Err(forbidden("view this order"));
    }
    Ok(Json(OrderDto::from_order(&order)))
}

async fn list_order_payments<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<PaymentDto>>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let order_id = OrderId::new(id);
    let order = state
        .orders
        .find_by_id(&order_id)
        .await
        .map_err(|e| api_error(&e.into()))?
        .ok_or_else(|| not_found("Order"))?;
    if !actor.can_act_for(order.customer_id()) {
        return Err(forbidden("view this order's payments"));
    }
    let payments = state
        .payments
        .find_by_order(&order_id)
        .await
        .map_err(|e| api_error(&e.into()))?;
    Ok(Json(payments.iter().map(PaymentDto::from_payment).collect()))
}

async fn cancel_order<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OrderDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let reason = if actor.is_admin() {
        CancelReason::admin_action()
    } else {
        CancelReason::customer_requested()
    };
    let dto = state
        .cancel_order
        .execute(&actor, &OrderId::new(id), reason)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn complete_payment<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CompletePaymentRequest>,
) -> Result<Json<OrderDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let dto = state
        .complete_payment
        .execute(&actor, &OrderId::new(id), request.method)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn update_order_status<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderDto>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let dto = state
        .update_status
        .execute(&actor, &OrderId::new(id), request.status)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(dto))
}

async fn delete_order_hard<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    state
        .delete_order
        .execute(&actor, &OrderId::new(id))
        .await
        .map_err(|e| api_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn monthly_sales<P, C, O, Y, X, N>(
    State(state): State<AppState<P, C, O, Y, X, N>>,
    headers: HeaderMap,
) -> Result<Json<Vec<MonthlySalesDto>>, ApiError>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    let actor = principal(&headers)?;
    let report = state
        .sales_report
        .execute(&actor)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(report))
}
