//! In-memory repositories.
//!
//! Document-store stand-ins backed by `RwLock<HashMap>`: each save replaces
//! one aggregate atomically, which is exactly the consistency the real
//! store offers (per-document atomicity, nothing across documents).
//! Suitable for development and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::cart::{Cart, CartError, CartOwner, CartRepository};
use crate::domain::catalog::{CatalogError, Product, ProductRepository};
use crate::domain::ordering::{Order, OrderError, OrderRepository};
use crate::domain::payment::{Payment, PaymentError, PaymentRepository};
use crate::domain::shared::{CustomerId, OrderId, PaymentId, ProductId};

// =============================================================================
// Products
// =============================================================================

/// In-memory implementation of `ProductRepository`.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<(), CatalogError> {
        let mut products = self.products.write().unwrap_or_else(|e| e.into_inner());
        products.insert(product.id().as_str().to_string(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().unwrap_or_else(|e| e.into_inner());
        Ok(products.get(id.as_str()).cloned())
    }

    async fn find_active(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().unwrap_or_else(|e| e.into_inner());
        Ok(products.values().filter(|p| p.is_active()).cloned().collect())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let mut products = self.products.write().unwrap_or_else(|e| e.into_inner());
        products
            .remove(id.as_str())
            .ok_or_else(|| CatalogError::NotFound {
                product_id: id.as_str().to_string(),
            })?;
        Ok(())
    }
}

// =============================================================================
// Carts
// =============================================================================

/// In-memory implementation of `CartRepository`, keyed by owner.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<String, Cart>>,
}

impl InMemoryCartRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let mut carts = self.carts.write().unwrap_or_else(|e| e.into_inner());
        carts.insert(cart.owner().key(), cart.clone());
        Ok(())
    }

    async fn find_by_owner(&self, owner: &CartOwner) -> Result<Option<Cart>, CartError> {
        let carts = self.carts.read().unwrap_or_else(|e| e.into_inner());
        Ok(carts.get(&owner.key()).cloned())
    }

    async fn delete_by_owner(&self, owner: &CartOwner) -> Result<(), CartError> {
        let mut carts = self.carts.write().unwrap_or_else(|e| e.into_inner());
        carts.remove(&owner.key());
        Ok(())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// In-memory implementation of `OrderRepository`.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(|e| e.into_inner());
        orders.insert(order.id().as_str().to_string(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(|e| e.into_inner());
        Ok(orders.get(id.as_str()).cloned())
    }

    async fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<Order> = orders
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect();
        found.sort_by_key(|o| std::cmp::Reverse(o.created_at()));
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(|e| e.into_inner());
        Ok(orders.values().cloned().collect())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(|e| e.into_inner());
        orders.remove(id.as_str()).ok_or_else(|| OrderError::NotFound {
            order_id: id.as_str().to_string(),
        })?;
        Ok(())
    }
}

// =============================================================================
// Payments
// =============================================================================

/// In-memory implementation of `PaymentRepository`.
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<String, Payment>>,
}

impl InMemoryPaymentRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            payments: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored payments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payments.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), PaymentError> {
        let mut payments = self.payments.write().unwrap_or_else(|e| e.into_inner());
        payments.insert(payment.id().as_str().to_string(), payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError> {
        let payments = self.payments.read().unwrap_or_else(|e| e.into_inner());
        Ok(payments.get(id.as_str()).cloned())
    }

    async fn find_by_order(&self, order_id: &OrderId) -> Result<Vec<Payment>, PaymentError> {
        let payments = self.payments.read().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<Payment> = payments
            .values()
            .filter(|p| p.order_id() == order_id)
            .cloned()
            .collect();
        found.sort_by_key(Payment::created_at);
        Ok(found)
    }

    async fn delete(&self, id: &PaymentId) -> Result<(), PaymentError> {
        let mut payments = self.payments.write().unwrap_or_else(|e| e.into_inner());
        payments.remove(id.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CreateProductCommand;
    use crate::domain::shared::{Money, Quantity};

    fn make_product() -> Product {
        Product::new(CreateProductCommand {
            name: "Desk lamp".to_string(),
            unit_price: Money::from_cents(5000),
            stock: Quantity::new(10),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn product_save_and_find() {
        let repo = InMemoryProductRepository::new();
        let product = make_product();

        repo.save(&product).await.unwrap();

        let found = repo.find_by_id(product.id()).await.unwrap();
        assert!(found.is_some());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn product_find_active_excludes_deactivated() {
        let repo = InMemoryProductRepository::new();
        let mut product = make_product();
        repo.save(&product).await.unwrap();

        product.deactivate();
        repo.save(&product).await.unwrap();

        assert!(repo.find_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn product_delete_missing_fails() {
        let repo = InMemoryProductRepository::new();
        let result = repo.delete(&ProductId::new("ghost")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn cart_is_keyed_by_owner() {
        let repo = InMemoryCartRepository::new();
        let owner = CartOwner::guest("sess-1");
        let cart = Cart::new(owner.clone());

        repo.save(&cart).await.unwrap();
        assert!(repo.find_by_owner(&owner).await.unwrap().is_some());

        // Saving again replaces, not duplicates.
        repo.save(&cart).await.unwrap();
        repo.delete_by_owner(&owner).await.unwrap();
        assert!(repo.find_by_owner(&owner).await.unwrap().is_none());

        // Deleting an absent cart is a no-op.
        repo.delete_by_owner(&owner).await.unwrap();
    }

    #[tokio::test]
    async fn payment_delete_is_idempotent() {
        let repo = InMemoryPaymentRepository::new();
        repo.delete(&PaymentId::new("ghost")).await.unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn order_delete_missing_fails() {
        let repo = InMemoryOrderRepository::new();
        let result = repo.delete(&OrderId::new("ghost")).await;
        assert!(matches!(result, Err(OrderError::NotFound { .. })));
    }
}
