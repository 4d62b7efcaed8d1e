//! Order Lifecycle Integration Tests
//!
//! End-to-end runs through the use-case layer with in-memory repositories
//! and a deterministic processor: cart → placement → cancellation/refund,
//! delivery → balance collection, the admin status path, hard-delete
//! guards, and the monthly sales projection.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefront_engine::application::ServiceError;
use storefront_engine::application::use_cases::{
    CancelOrderUseCase, CompletePaymentUseCase, DeleteOrderUseCase, DirectItem, ManageCartUseCase,
    OrderSource, PlaceOrderRequest, PlaceOrderUseCase, SalesReportUseCase,
    UpdateOrderStatusUseCase,
};
use storefront_engine::config::{CheckoutConfig, PaymentsConfig};
use storefront_engine::domain::cart::CartOwner;
use storefront_engine::domain::catalog::ProductRepository;
use storefront_engine::domain::ordering::value_objects::{CancelReason, ShippingAddress};
use storefront_engine::domain::ordering::{OrderError, OrderRepository};
use storefront_engine::domain::payment::{
    PaymentKind, PaymentMethod, PaymentRepository, PaymentStatus,
};
use storefront_engine::{
    Actor, CreateProductCommand, CustomerId, InMemoryCartRepository, InMemoryOrderRepository,
    InMemoryPaymentRepository, InMemoryProductRepository, MockPaymentProcessor, Money,
    NoOpNotifier, OrderId, OrderStatus, Product, ProductId, Quantity,
};

struct Harness {
    products: Arc<InMemoryProductRepository>,
    orders: Arc<InMemoryOrderRepository>,
    payments: Arc<InMemoryPaymentRepository>,
    manage_cart: ManageCartUseCase<InMemoryProductRepository, InMemoryCartRepository>,
    place_order: PlaceOrderUseCase<
        InMemoryProductRepository,
        InMemoryCartRepository,
        InMemoryOrderRepository,
        InMemoryPaymentRepository,
        MockPaymentProcessor,
        NoOpNotifier,
    >,
    cancel_order: Arc<
        CancelOrderUseCase<
            InMemoryProductRepository,
            InMemoryOrderRepository,
            InMemoryPaymentRepository,
            NoOpNotifier,
        >,
    >,
    complete_payment: CompletePaymentUseCase<
        InMemoryOrderRepository,
        InMemoryPaymentRepository,
        MockPaymentProcessor,
        NoOpNotifier,
    >,
    update_status: UpdateOrderStatusUseCase<
        InMemoryProductRepository,
        InMemoryOrderRepository,
        InMemoryPaymentRepository,
        NoOpNotifier,
    >,
    delete_order: DeleteOrderUseCase<
        InMemoryProductRepository,
        InMemoryOrderRepository,
        InMemoryPaymentRepository,
    >,
    sales_report: SalesReportUseCase<InMemoryOrderRepository>,
}

/// Build the full engine with a deterministic approving processor and the
/// spec-friendly policy: no tax, no shipping, 50% deposit, 24h window, 2% fee.
fn make_harness() -> Harness {
    let products = Arc::new(InMemoryProductRepository::new());
    let carts = Arc::new(InMemoryCartRepository::new());
    let orders = Arc::new(InMemoryOrderRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());
    let processor = Arc::new(MockPaymentProcessor::always_approve());
    let notifier = Arc::new(NoOpNotifier);

    let checkout = CheckoutConfig {
        tax_rate: Decimal::ZERO,
        shipping_flat: Decimal::ZERO,
        ..CheckoutConfig::default()
    };
    let payment_settings = PaymentsConfig {
        latency_ms: 0,
        ..PaymentsConfig::default()
    };

    let manage_cart = ManageCartUseCase::new(Arc::clone(&products), Arc::clone(&carts));
    let place_order = PlaceOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&carts),
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::clone(&processor),
        Arc::clone(&notifier),
        checkout.clone(),
        payment_settings.clone(),
    );
    let cancel_order = Arc::new(CancelOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::clone(&notifier),
        checkout.clone(),
    ));
    let complete_payment = CompletePaymentUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::clone(&processor),
        Arc::clone(&notifier),
        payment_settings,
    );
    let update_status = UpdateOrderStatusUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&notifier),
        Arc::clone(&cancel_order),
    );
    let delete_order = DeleteOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::clone(&payments),
    );
    let sales_report = SalesReportUseCase::new(Arc::clone(&orders));

    Harness {
        products,
        orders,
        payments,
        manage_cart,
        place_order,
        cancel_order,
        complete_payment,
        update_status,
        delete_order,
        sales_report,
    }
}

async fn seed_product(harness: &Harness, stock: u32, price_cents: i64) -> ProductId {
    let product = Product::new(CreateProductCommand {
        name: "Walnut desk organizer".to_string(),
        unit_price: Money::from_cents(price_cents),
        stock: Quantity::new(stock),
    })
    .unwrap();
    let id = product.id().clone();
    harness.products.save(&product).await.unwrap();
    id
}

fn customer() -> Actor {
    Actor::customer(CustomerId::new("c-1"))
}

fn admin() -> Actor {
    Actor::admin(CustomerId::new("ops-1"))
}

fn shipping() -> ShippingAddress {
    ShippingAddress {
        recipient: "Dana Reyes".to_string(),
        street: "12 Canal Walk".to_string(),
        city: "Portland".to_string(),
        postal_code: "97201".to_string(),
        country: "US".to_string(),
    }
}

fn cart_checkout(deposit_cents: i64) -> PlaceOrderRequest {
    PlaceOrderRequest {
        source: OrderSource::Cart,
        shipping_address: shipping(),
        method: PaymentMethod::Card,
        deposit: Money::from_cents(deposit_cents),
    }
}

async fn stock_and_sold(harness: &Harness, product_id: &ProductId) -> (u32, u32) {
    let product = harness
        .products
        .find_by_id(product_id)
        .await
        .unwrap()
        .unwrap();
    (product.stock().value(), product.sold().value())
}

// ============================================
// The worked scenario from the product brief
// ============================================

#[tokio::test]
async fn deposit_order_then_cancel_within_window() {
    let harness = make_harness();
    // Product: stock 10, price $50.00
    let product_id = seed_product(&harness, 10, 5000).await;

    // Add 3 to the cart: total $150.00
    let cart = harness
        .manage_cart
        .add_item(
            &CartOwner::customer(CustomerId::new("c-1")),
            &product_id,
            Quantity::new(3),
        )
        .await
        .unwrap();
    assert_eq!(cart.subtotal, dec!(150.00));

    // Place with a $75.00 deposit (exactly half).
    let order = harness
        .place_order
        .execute(&customer(), cart_checkout(7500))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.payment_due, dec!(75.00));
    assert_eq!(stock_and_sold(&harness, &product_id).await, (7, 3));

    // Cancel within the window: stock restored, 98% refund recorded.
    let order_id = OrderId::new(order.id.clone());
    let cancelled = harness
        .cancel_order
        .execute(&customer(), &order_id, CancelReason::customer_requested())
        .await
        .unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(stock_and_sold(&harness, &product_id).await, (10, 0));

    let payments = harness.payments.find_by_order(&order_id).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].status(), PaymentStatus::Refunded);
    let refund = payments[0].refund_record().unwrap();
    assert_eq!(refund.amount, Money::from_cents(7350)); // 98% of $75.00
}

#[tokio::test]
async fn cancel_is_idempotent_under_retry() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    harness
        .manage_cart
        .add_item(
            &CartOwner::customer(CustomerId::new("c-1")),
            &product_id,
            Quantity::new(3),
        )
        .await
        .unwrap();
    let order = harness
        .place_order
        .execute(&customer(), cart_checkout(7500))
        .await
        .unwrap();
    let order_id = OrderId::new(order.id);

    harness
        .cancel_order
        .execute(&customer(), &order_id, CancelReason::customer_requested())
        .await
        .unwrap();
    // The caller times out and retries: no double refund, no double restock.
    let retried = harness
        .cancel_order
        .execute(&customer(), &order_id, CancelReason::customer_requested())
        .await
        .unwrap();

    assert_eq!(retried.status, OrderStatus::Cancelled);
    assert_eq!(stock_and_sold(&harness, &product_id).await, (10, 0));
    let payments = harness.payments.find_by_order(&order_id).await.unwrap();
    assert_eq!(payments.len(), 1);
    let refund = payments[0].refund_record().unwrap();
    assert_eq!(refund.amount, Money::from_cents(7350));
}

#[tokio::test]
async fn cancel_by_another_customer_is_forbidden() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    let order = harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id,
                    quantity: Quantity::new(1),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(2500),
            },
        )
        .await
        .unwrap();

    let stranger = Actor::customer(CustomerId::new("c-2"));
    let result = harness
        .cancel_order
        .execute(
            &stranger,
            &OrderId::new(order.id),
            CancelReason::customer_requested(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Order(OrderError::Forbidden { .. }))
    ));
}

// ============================================
// Delivery and balance collection
// ============================================

#[tokio::test]
async fn delivered_order_collects_the_balance() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    harness
        .manage_cart
        .add_item(
            &CartOwner::customer(CustomerId::new("c-1")),
            &product_id,
            Quantity::new(3),
        )
        .await
        .unwrap();
    let order = harness
        .place_order
        .execute(&customer(), cart_checkout(7500))
        .await
        .unwrap();
    let order_id = OrderId::new(order.id);

    // Admin walks the order to delivered.
    harness
        .update_status
        .execute(&admin(), &order_id, OrderStatus::Shipped)
        .await
        .unwrap();
    let delivered = harness
        .update_status
        .execute(&admin(), &order_id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert!(delivered.delivered_at.is_some());

    // Customer settles the remaining $75.00.
    let settled = harness
        .complete_payment
        .execute(&customer(), &order_id, PaymentMethod::Card)
        .await
        .unwrap();
    assert_eq!(settled.payment_due, Decimal::ZERO);
    assert_eq!(settled.amount_paid, dec!(150.00));

    let payments = harness.payments.find_by_order(&order_id).await.unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[1].kind(), PaymentKind::Balance);
    assert_eq!(payments[1].amount(), Money::from_cents(7500));
    assert_eq!(payments[1].status(), PaymentStatus::Paid);

    // Nothing left to collect.
    let again = harness
        .complete_payment
        .execute(&customer(), &order_id, PaymentMethod::Card)
        .await;
    assert!(matches!(
        again,
        Err(ServiceError::Order(OrderError::AlreadyPaid { .. }))
    ));
}

#[tokio::test]
async fn balance_cannot_be_collected_before_delivery() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    let order = harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id,
                    quantity: Quantity::new(2),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(5000),
            },
        )
        .await
        .unwrap();

    let result = harness
        .complete_payment
        .execute(&customer(), &OrderId::new(order.id), PaymentMethod::Card)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Order(OrderError::NotYetDelivered { .. }))
    ));
}

// ============================================
// Admin status path
// ============================================

#[tokio::test]
async fn admin_cancellation_carries_the_same_side_effects() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    harness
        .manage_cart
        .add_item(
            &CartOwner::customer(CustomerId::new("c-1")),
            &product_id,
            Quantity::new(3),
        )
        .await
        .unwrap();
    let order = harness
        .place_order
        .execute(&customer(), cart_checkout(7500))
        .await
        .unwrap();
    let order_id = OrderId::new(order.id);

    // The admin status path must release stock and refund exactly like the
    // customer-facing cancel.
    let cancelled = harness
        .update_status
        .execute(&admin(), &order_id, OrderStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(stock_and_sold(&harness, &product_id).await, (10, 0));
    let payments = harness.payments.find_by_order(&order_id).await.unwrap();
    assert_eq!(payments[0].status(), PaymentStatus::Refunded);
    assert_eq!(
        payments[0].refund_record().unwrap().amount,
        Money::from_cents(7350)
    );
}

#[tokio::test]
async fn status_update_requires_admin() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    let order = harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id,
                    quantity: Quantity::new(1),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(2500),
            },
        )
        .await
        .unwrap();

    let result = harness
        .update_status
        .execute(&customer(), &OrderId::new(order.id), OrderStatus::Shipped)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Order(OrderError::Forbidden { .. }))
    ));
}

// ============================================
// Hard deletion
// ============================================

#[tokio::test]
async fn orders_with_money_moved_cannot_be_hard_deleted() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 10, 5000).await;

    let order = harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id,
                    quantity: Quantity::new(1),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(2500),
            },
        )
        .await
        .unwrap();
    let order_id = OrderId::new(order.id);

    let result = harness.delete_order.execute(&admin(), &order_id).await;

    assert!(matches!(
        result,
        Err(ServiceError::Order(OrderError::PaymentsRecorded { .. }))
    ));
    assert!(harness.orders.find_by_id(&order_id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_requires_admin() {
    let harness = make_harness();
    let result = harness
        .delete_order
        .execute(&customer(), &OrderId::new("ord-x"))
        .await;
    assert!(matches!(
        result,
        Err(ServiceError::Order(OrderError::Forbidden { .. }))
    ));
}

// ============================================
// Sales projection
// ============================================

#[tokio::test]
async fn monthly_sales_count_only_fully_paid_orders() {
    let harness = make_harness();
    let product_id = seed_product(&harness, 20, 5000).await;

    // Order 1: full upfront payment -> counts immediately.
    harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id: product_id.clone(),
                    quantity: Quantity::new(2),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(10000),
            },
        )
        .await
        .unwrap();

    // Order 2: half paid, never delivered -> not counted.
    harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id: product_id.clone(),
                    quantity: Quantity::new(2),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(5000),
            },
        )
        .await
        .unwrap();

    // Order 3: fully paid then cancelled -> not counted.
    let cancelled = harness
        .place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id,
                    quantity: Quantity::new(1),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(5000),
            },
        )
        .await
        .unwrap();
    harness
        .cancel_order
        .execute(
            &customer(),
            &OrderId::new(cancelled.id),
            CancelReason::customer_requested(),
        )
        .await
        .unwrap();

    let report = harness.sales_report.execute(&admin()).await.unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].orders, 1);
    assert_eq!(report[0].total, dec!(100.00));
}

#[tokio::test]
async fn sales_report_requires_admin() {
    let harness = make_harness();
    let result = harness.sales_report.execute(&customer()).await;
    assert!(matches!(
        result,
        Err(ServiceError::Order(OrderError::Forbidden { .. }))
    ));
}

// ============================================
// Declines
// ============================================

#[tokio::test]
async fn declined_deposit_leaves_no_order_and_no_reservation() {
    let products = Arc::new(InMemoryProductRepository::new());
    let carts = Arc::new(InMemoryCartRepository::new());
    let orders = Arc::new(InMemoryOrderRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());

    let place_order = PlaceOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&carts),
        Arc::clone(&orders),
        Arc::clone(&payments),
        Arc::new(MockPaymentProcessor::always_decline()),
        Arc::new(NoOpNotifier),
        CheckoutConfig {
            tax_rate: Decimal::ZERO,
            shipping_flat: Decimal::ZERO,
            ..CheckoutConfig::default()
        },
        PaymentsConfig::default(),
    );

    let product = Product::new(CreateProductCommand {
        name: "Walnut desk organizer".to_string(),
        unit_price: Money::from_cents(5000),
        stock: Quantity::new(10),
    })
    .unwrap();
    let product_id = product.id().clone();
    products.save(&product).await.unwrap();

    let result = place_order
        .execute(
            &customer(),
            PlaceOrderRequest {
                source: OrderSource::Items(vec![DirectItem {
                    product_id: product_id.clone(),
                    quantity: Quantity::new(3),
                }]),
                shipping_address: shipping(),
                method: PaymentMethod::Card,
                deposit: Money::from_cents(7500),
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Processor(_))));
    assert!(orders.find_all().await.unwrap().is_empty());

    let stored = products.find_by_id(&product_id).await.unwrap().unwrap();
    assert_eq!(stored.stock(), Quantity::new(10));
    assert_eq!(stored.sold(), Quantity::ZERO);

    // The failed movement is still on record.
    assert_eq!(payments.len(), 1);
}
