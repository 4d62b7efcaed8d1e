//! Place Order Use Case
//!
//! The one supported path from a cart (or a direct item list) into an
//! order: compute charges, enforce the deposit minimum, reserve inventory
//! all-or-nothing, collect the deposit through the processor, and delete the
//! source cart.

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::application::error::ServiceError;
use crate::application::ports::{
    ChargeRequest, NotifierPort, PaymentProcessorPort, ProcessorError, ProcessorReceipt,
    charge_with_deadline,
};
use crate::config::{CheckoutConfig, PaymentsConfig};
use crate::domain::cart::{CartError, CartOwner, CartRepository};
use crate::domain::catalog::{CatalogError, ProductRepository};
use crate::domain::ordering::aggregate::PlaceOrderCommand;
use crate::domain::ordering::events::OrderEvent;
use crate::domain::ordering::value_objects::{Charges, ShippingAddress};
use crate::domain::ordering::{Order, OrderLine, OrderRepository};
use crate::domain::payment::{Payment, PaymentMethod, PaymentRepository};
use crate::domain::shared::{Actor, Money, ProductId, Quantity};

/// Where the order's lines come from.
#[derive(Debug, Clone)]
pub enum OrderSource {
    /// Materialize the acting customer's cart.
    Cart,
    /// Direct item list, bypassing the cart.
    Items(Vec<DirectItem>),
}

/// One requested item on the direct-list path.
#[derive(Debug, Clone)]
pub struct DirectItem {
    /// Product to order.
    pub product_id: ProductId,
    /// Units requested.
    pub quantity: Quantity,
}

/// Request to place an order.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    /// Line source.
    pub source: OrderSource,
    /// Shipping destination.
    pub shipping_address: ShippingAddress,
    /// Payment method for the deposit.
    pub method: PaymentMethod,
    /// Deposit the customer pays now (at least half the total).
    pub deposit: Money,
}

/// Use case for placing orders.
pub struct PlaceOrderUseCase<P, C, O, Y, X, N>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    products: Arc<P>,
    carts: Arc<C>,
    orders: Arc<O>,
    payments: Arc<Y>,
    processor: Arc<X>,
    notifier: Arc<N>,
    checkout: CheckoutConfig,
    payment_settings: PaymentsConfig,
}

impl<P, C, O, Y, X, N> PlaceOrderUseCase<P, C, O, Y, X, N>
where
    P: ProductRepository,
    C: CartRepository,
    O: OrderRepository,
    Y: PaymentRepository,
    X: PaymentProcessorPort,
    N: NotifierPort,
{
    /// Create a new PlaceOrderUseCase.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        products: Arc<P>,
        carts: Arc<C>,
        orders: Arc<O>,
        payments: Arc<Y>,
        processor: Arc<X>,
        notifier: Arc<N>,
        checkout: CheckoutConfig,
        payment_settings: PaymentsConfig,
    ) -> Self {
        Self {
            products,
            carts,
            orders,
            payments,
            processor,
            notifier,
            checkout,
            payment_settings,
        }
    }

    /// Execute the use case.
    ///
    /// On any failure after inventory was touched, previously reserved lines
    /// are released again: no partial reservation survives a failed
    /// placement.
    pub async fn execute(
        &self,
        actor: &Actor,
        request: PlaceOrderRequest,
    ) -> Result<OrderDto, ServiceError> {
        let customer_id = actor.id().clone();
        let cart_owner = CartOwner::customer(customer_id.clone());

        // 1. Resolve line snapshots.
        let (lines, from_cart) = match &request.source {
            OrderSource::Cart => (self.materialize_cart(&cart_owner).await?, true),
            OrderSource::Items(items) => (self.snapshot_items(items).await?, false),
        };

        // 2. Derive the money fields from policy.
        let items_total: Money = lines.iter().map(OrderLine::line_total).sum();
        let charges = Charges::compute(
            items_total,
            self.checkout.tax_rate,
            self.checkout.shipping_for(items_total),
        );

        // 3. Build the aggregate (validates the deposit minimum).
        let mut order = Order::place(PlaceOrderCommand {
            customer_id: customer_id.clone(),
            lines,
            shipping_address: request.shipping_address,
            charges,
            deposit: request.deposit,
            min_deposit_fraction: self.checkout.deposit_fraction,
        })?;

        // 4. Reserve inventory, all-or-nothing.
        self.reserve_all(order.lines()).await?;

        // 5. Collect the deposit. A decline rolls the reservations back.
        let mut payment = Payment::deposit(
            order.id().clone(),
            customer_id,
            request.deposit,
            request.method,
        )?;
        payment.begin_processing()?;

        match self.charge(&payment).await {
            Ok(receipt) => payment.mark_paid(receipt.reference)?,
            Err(processor_error) => {
                if let Err(e) = payment.mark_failed(processor_error.to_string()) {
                    tracing::error!(error = %e, "Failed to record payment failure");
                }
                if let Err(e) = self.payments.save(&payment).await {
                    tracing::error!(error = %e, "Failed to save declined payment");
                }
                self.release_reserved(order.lines()).await;
                return Err(processor_error.into());
            }
        }

        order.confirm_deposit(payment.id().clone(), payment.amount())?;

        // 6. Persist.
        self.payments.save(&payment).await?;
        self.orders.save(&order).await?;

        // 7. The cart is consumed by a successful placement.
        if from_cart {
            if let Err(e) = self.carts.delete_by_owner(&cart_owner).await {
                tracing::warn!(error = %e, "Failed to delete consumed cart");
            }
        }

        // 8. Notify, best-effort.
        self.publish(order.drain_events()).await;

        Ok(OrderDto::from_order(&order))
    }

    /// Recompute the cart's lines against the live catalog.
    ///
    /// Quantities clamp to available stock; lines whose product vanished or
    /// went off sale are dropped. Prices stay at the add-time snapshot.
    async fn materialize_cart(&self, owner: &CartOwner) -> Result<Vec<OrderLine>, ServiceError> {
        let cart =
            self.carts
                .find_by_owner(owner)
                .await?
                .ok_or_else(|| CartError::EmptyCart {
                    owner: owner.key(),
                })?;
        if cart.is_empty() {
            return Err(CartError::EmptyCart {
                owner: owner.key(),
            }
            .into());
        }

        let mut lines = Vec::new();
        for cart_line in cart.lines() {
            let Some(product) = self.products.find_by_id(cart_line.product_id()).await? else {
                continue;
            };
            if !product.is_active() {
                continue;
            }
            let quantity = cart_line.quantity().min(product.stock());
            if quantity.is_zero() {
                continue;
            }
            lines.push(OrderLine::new(
                product.id().clone(),
                product.name(),
                quantity,
                cart_line.price_at_addition(),
            )?);
        }

        if lines.is_empty() {
            return Err(CartError::EmptyCart {
                owner: owner.key(),
            }
            .into());
        }
        Ok(lines)
    }

    /// Snapshot a direct item list against the live catalog.
    async fn snapshot_items(&self, items: &[DirectItem]) -> Result<Vec<OrderLine>, ServiceError> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .products
                .find_by_id(&item.product_id)
                .await?
                .ok_or_else(|| CatalogError::NotFound {
                    product_id: item.product_id.as_str().to_string(),
                })?;
            if !product.is_active() {
                return Err(CatalogError::ProductInactive {
                    product_id: item.product_id.as_str().to_string(),
                }
                .into());
            }
            lines.push(OrderLine::new(
                product.id().clone(),
                product.name(),
                item.quantity,
                product.unit_price(),
            )?);
        }
        Ok(lines)
    }

    /// Reserve every line, or none.
    ///
    /// Reservations apply per product in line order; the first failure
    /// releases all prior reservations in reverse order before the error
    /// propagates (compensating rollback — the store only guarantees
    /// per-document atomicity).
    async fn reserve_all(&self, lines: &[OrderLine]) -> Result<(), ServiceError> {
        let mut reserved: Vec<(ProductId, Quantity)> = Vec::new();
        for line in lines {
            match self.reserve_one(line.product_id(), line.quantity()).await {
                Ok(()) => reserved.push((line.product_id().clone(), line.quantity())),
                Err(e) => {
                    self.release_batch(&reserved).await;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn reserve_one(
        &self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), ServiceError> {
        let mut product =
            self.products
                .find_by_id(product_id)
                .await?
                .ok_or_else(|| CatalogError::NotFound {
                    product_id: product_id.as_str().to_string(),
                })?;
        product.reserve(quantity)?;
        self.products.save(&product).await?;
        Ok(())
    }

    /// Release every line of an order whose placement failed after reserving.
    async fn release_reserved(&self, lines: &[OrderLine]) {
        let batch: Vec<(ProductId, Quantity)> = lines
            .iter()
            .map(|l| (l.product_id().clone(), l.quantity()))
            .collect();
        self.release_batch(&batch).await;
    }

    async fn release_batch(&self, reserved: &[(ProductId, Quantity)]) {
        for (product_id, quantity) in reserved.iter().rev() {
            match self.products.find_by_id(product_id).await {
                Ok(Some(mut product)) => {
                    product.release(*quantity);
                    if let Err(e) = self.products.save(&product).await {
                        tracing::error!(
                            product_id = %product_id,
                            error = %e,
                            "Failed to persist compensating release"
                        );
                    }
                }
                Ok(None) => {
                    tracing::warn!(product_id = %product_id, "Product vanished during rollback");
                }
                Err(e) => {
                    tracing::error!(
                        product_id = %product_id,
                        error = %e,
                        "Failed to load product for compensating release"
                    );
                }
            }
        }
    }

    async fn charge(&self, payment: &Payment) -> Result<ProcessorReceipt, ProcessorError> {
        let request = ChargeRequest {
            payment_id: payment.id().clone(),
            order_id: payment.order_id().clone(),
            customer_id: payment.customer_id().clone(),
            amount: payment.amount().amount(),
            method: payment.method(),
        };
        charge_with_deadline(
            self.processor.as_ref(),
            request,
            self.payment_settings.timeout(),
        )
        .await
    }

    async fn publish(&self, events: Vec<OrderEvent>) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.notifier.publish_order_events(events).await {
            tracing::warn!(error = %e, "Failed to publish order events");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockPaymentProcessorPort, NoOpNotifier};
    use crate::domain::catalog::{CreateProductCommand, Product};
    use crate::domain::ordering::OrderError;
    use crate::domain::ordering::value_objects::OrderStatus;
    use crate::domain::payment::PaymentStatus;
    use crate::domain::shared::{CustomerId, Timestamp};
    use crate::infrastructure::persistence::{
        InMemoryCartRepository, InMemoryOrderRepository, InMemoryPaymentRepository,
        InMemoryProductRepository,
    };

    struct Fixture {
        use_case: PlaceOrderUseCase<
            InMemoryProductRepository,
            InMemoryCartRepository,
            InMemoryOrderRepository,
            InMemoryPaymentRepository,
            MockPaymentProcessorPort,
            NoOpNotifier,
        >,
        products: Arc<InMemoryProductRepository>,
        carts: Arc<InMemoryCartRepository>,
        orders: Arc<InMemoryOrderRepository>,
        payments: Arc<InMemoryPaymentRepository>,
    }

    fn make_fixture(processor: MockPaymentProcessorPort) -> Fixture {
        let products = Arc::new(InMemoryProductRepository::new());
        let carts = Arc::new(InMemoryCartRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());

        // Zero tax and shipping keep the arithmetic in the assertions plain.
        let checkout = CheckoutConfig {
            tax_rate: rust_decimal::Decimal::ZERO,
            shipping_flat: rust_decimal::Decimal::ZERO,
            ..CheckoutConfig::default()
        };

        let use_case = PlaceOrderUseCase::new(
            Arc::clone(&products),
            Arc::clone(&carts),
            Arc::clone(&orders),
            Arc::clone(&payments),
            Arc::new(processor),
            Arc::new(NoOpNotifier),
            checkout,
            PaymentsConfig::default(),
        );

        Fixture {
            use_case,
            products,
            carts,
            orders,
            payments,
        }
    }

    fn approving_processor() -> MockPaymentProcessorPort {
        let mut processor = MockPaymentProcessorPort::new();
        processor.expect_charge().returning(|request| {
            Ok(ProcessorReceipt {
                reference: format!("proc-{}", request.payment_id),
                processed_at: Timestamp::now(),
            })
        });
        processor
    }

    fn declining_processor() -> MockPaymentProcessorPort {
        let mut processor = MockPaymentProcessorPort::new();
        processor.expect_charge().returning(|_| {
            Err(ProcessorError::Declined {
                reason: "simulated decline".to_string(),
            })
        });
        processor
    }

    async fn seed_product(products: &InMemoryProductRepository, stock: u32, cents: i64) -> Product {
        let product = Product::new(CreateProductCommand {
            name: "Walnut desk organizer".to_string(),
            unit_price: Money::from_cents(cents),
            stock: Quantity::new(stock),
        })
        .unwrap();
        products.save(&product).await.unwrap();
        product
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            recipient: "Dana Reyes".to_string(),
            street: "12 Canal Walk".to_string(),
            city: "Portland".to_string(),
            postal_code: "97201".to_string(),
            country: "US".to_string(),
        }
    }

    fn direct_request(product: &Product, quantity: u32, deposit_cents: i64) -> PlaceOrderRequest {
        PlaceOrderRequest {
            source: OrderSource::Items(vec![DirectItem {
                product_id: product.id().clone(),
                quantity: Quantity::new(quantity),
            }]),
            shipping_address: address(),
            method: PaymentMethod::Card,
            deposit: Money::from_cents(deposit_cents),
        }
    }

    fn actor() -> Actor {
        Actor::customer(CustomerId::new("c-1"))
    }

    #[tokio::test]
    async fn direct_order_reserves_stock_and_collects_deposit() {
        let fixture = make_fixture(approving_processor());
        let product = seed_product(&fixture.products, 10, 5000).await;

        let dto = fixture
            .use_case
            .execute(&actor(), direct_request(&product, 3, 7500))
            .await
            .unwrap();

        assert_eq!(dto.status, OrderStatus::Processing);
        assert!(dto.confirmed);
        assert_eq!(dto.payment_due, Money::from_cents(7500).amount());
        assert_eq!(dto.amount_paid, Money::from_cents(7500).amount());

        let stored = fixture.products.find_by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), Quantity::new(7));
        assert_eq!(stored.sold(), Quantity::new(3));

        let order_id = crate::domain::shared::OrderId::new(dto.id.clone());
        assert!(fixture.orders.find_by_id(&order_id).await.unwrap().is_some());
        let payments = fixture.payments.find_by_order(&order_id).await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status(), PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn deposit_below_half_is_rejected_before_touching_stock() {
        let fixture = make_fixture(MockPaymentProcessorPort::new());
        let product = seed_product(&fixture.products, 10, 5000).await;

        let result = fixture
            .use_case
            .execute(&actor(), direct_request(&product, 3, 7000))
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Order(OrderError::InsufficientDeposit { .. }))
        ));
        let stored = fixture.products.find_by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), Quantity::new(10));
        assert_eq!(stored.sold(), Quantity::ZERO);
    }

    #[tokio::test]
    async fn partial_reservation_rolls_back_on_failure() {
        let fixture = make_fixture(MockPaymentProcessorPort::new());
        let plentiful = seed_product(&fixture.products, 10, 1000).await;
        let scarce = seed_product(&fixture.products, 1, 1000).await;

        let request = PlaceOrderRequest {
            source: OrderSource::Items(vec![
                DirectItem {
                    product_id: plentiful.id().clone(),
                    quantity: Quantity::new(4),
                },
                DirectItem {
                    product_id: scarce.id().clone(),
                    quantity: Quantity::new(2),
                },
            ]),
            shipping_address: address(),
            method: PaymentMethod::Card,
            deposit: Money::from_cents(3000),
        };

        let result = fixture.use_case.execute(&actor(), request).await;

        assert!(matches!(
            result,
            Err(ServiceError::Catalog(
                CatalogError::InsufficientStock { .. }
            ))
        ));
        // The first product's reservation was compensated.
        let stored = fixture.products.find_by_id(plentiful.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), Quantity::new(10));
        assert_eq!(stored.sold(), Quantity::ZERO);
    }

    #[tokio::test]
    async fn processor_decline_releases_stock_and_records_failed_payment() {
        let fixture = make_fixture(declining_processor());
        let product = seed_product(&fixture.products, 10, 5000).await;

        let result = fixture
            .use_case
            .execute(&actor(), direct_request(&product, 3, 7500))
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Processor(ProcessorError::Declined { .. }))
        ));

        let stored = fixture.products.find_by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), Quantity::new(10));
        assert_eq!(stored.sold(), Quantity::ZERO);

        // No order was created, but the failed payment is on record.
        assert!(fixture.orders.find_all().await.unwrap().is_empty());
        assert_eq!(fixture.payments.len(), 1);
    }

    #[tokio::test]
    async fn cart_order_consumes_the_cart() {
        let fixture = make_fixture(approving_processor());
        let product = seed_product(&fixture.products, 10, 5000).await;

        let owner = CartOwner::customer(CustomerId::new("c-1"));
        let mut cart = crate::domain::cart::Cart::new(owner.clone());
        cart.add(
            crate::domain::cart::CartLine::new(
                product.id().clone(),
                product.name(),
                Quantity::new(3),
                product.unit_price(),
            )
            .unwrap(),
        );
        fixture.carts.save(&cart).await.unwrap();

        let request = PlaceOrderRequest {
            source: OrderSource::Cart,
            shipping_address: address(),
            method: PaymentMethod::Card,
            deposit: Money::from_cents(7500),
        };

        let dto = fixture.use_case.execute(&actor(), request).await.unwrap();

        assert_eq!(dto.lines.len(), 1);
        assert_eq!(dto.charges.total, Money::from_cents(15000).amount());
        assert!(fixture.carts.find_by_owner(&owner).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cart_materialization_clamps_to_live_stock() {
        let fixture = make_fixture(approving_processor());
        let product = seed_product(&fixture.products, 2, 5000).await;

        let owner = CartOwner::customer(CustomerId::new("c-1"));
        let mut cart = crate::domain::cart::Cart::new(owner.clone());
        cart.add(
            crate::domain::cart::CartLine::new(
                product.id().clone(),
                product.name(),
                Quantity::new(5),
                product.unit_price(),
            )
            .unwrap(),
        );
        fixture.carts.save(&cart).await.unwrap();

        let request = PlaceOrderRequest {
            source: OrderSource::Cart,
            shipping_address: address(),
            method: PaymentMethod::Card,
            deposit: Money::from_cents(5000),
        };

        let dto = fixture.use_case.execute(&actor(), request).await.unwrap();

        // 5 requested, 2 available: the line clamps.
        assert_eq!(dto.lines[0].quantity, 2);
        assert_eq!(dto.charges.items, Money::from_cents(10000).amount());
    }

    #[tokio::test]
    async fn empty_cart_cannot_checkout() {
        let fixture = make_fixture(MockPaymentProcessorPort::new());
        let request = PlaceOrderRequest {
            source: OrderSource::Cart,
            shipping_address: address(),
            method: PaymentMethod::Card,
            deposit: Money::from_cents(5000),
        };

        let result = fixture.use_case.execute(&actor(), request).await;
        assert!(matches!(
            result,
            Err(ServiceError::Cart(CartError::EmptyCart { .. }))
        ));
    }
}
