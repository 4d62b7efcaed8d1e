//! Cart Management Use Case
//!
//! Explicit service-layer entry points for every cart mutation: add, update
//! quantity, remove, clear, and the guest-to-customer merge at login. Stock
//! checks run against the live catalog here, not inside the aggregate.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dto::CartDto;
use crate::application::error::ServiceError;
use crate::domain::cart::{Cart, CartError, CartLine, CartOwner, CartRepository};
use crate::domain::catalog::{CatalogError, ProductRepository};
use crate::domain::shared::{CustomerId, ProductId, Quantity};

/// Use case for cart operations.
pub struct ManageCartUseCase<P, C>
where
    P: ProductRepository,
    C: CartRepository,
{
    products: Arc<P>,
    carts: Arc<C>,
}

impl<P, C> ManageCartUseCase<P, C>
where
    P: ProductRepository,
    C: CartRepository,
{
    /// Create a new ManageCartUseCase.
    pub fn new(products: Arc<P>, carts: Arc<C>) -> Self {
        Self { products, carts }
    }

    /// Fetch a cart for display, quantities clamped to live stock.
    ///
    /// An owner without a cart sees an empty one; nothing is persisted.
    pub async fn get(&self, owner: &CartOwner) -> Result<CartDto, ServiceError> {
        let cart = self
            .carts
            .find_by_owner(owner)
            .await?
            .unwrap_or_else(|| Cart::new(owner.clone()));
        self.clamped_dto(&cart).await
    }

    /// Add units of a product to the owner's cart.
    ///
    /// Fails with `NotFound` for unknown products, `ProductInactive` for
    /// products off sale, and `InsufficientStock` when the combined line
    /// quantity (existing + added) would exceed live stock.
    pub async fn add_item(
        &self,
        owner: &CartOwner,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<CartDto, ServiceError> {
        let product =
            self.products
                .find_by_id(product_id)
                .await?
                .ok_or_else(|| CatalogError::NotFound {
                    product_id: product_id.as_str().to_string(),
                })?;
        if !product.is_active() {
            return Err(CatalogError::ProductInactive {
                product_id: product_id.as_str().to_string(),
            }
            .into());
        }

        // Lazy creation on first add.
        let mut cart = self
            .carts
            .find_by_owner(owner)
            .await?
            .unwrap_or_else(|| Cart::new(owner.clone()));

        let existing = cart
            .line(product_id)
            .map_or(Quantity::ZERO, CartLine::quantity);
        let combined = existing.saturating_add(quantity);
        if combined > product.stock() {
            return Err(CatalogError::InsufficientStock {
                product_id: product_id.as_str().to_string(),
                requested: combined.value(),
                available: product.stock().value(),
            }
            .into());
        }

        let line = CartLine::new(
            product_id.clone(),
            product.name(),
            quantity,
            product.unit_price(),
        )?;
        cart.add(line);
        self.carts.save(&cart).await?;

        self.clamped_dto(&cart).await
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero removes the line; other values clamp to live stock (a vanished
    /// product clamps to zero and drops the line).
    pub async fn update_quantity(
        &self,
        owner: &CartOwner,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<CartDto, ServiceError> {
        let mut cart =
            self.carts
                .find_by_owner(owner)
                .await?
                .ok_or_else(|| CartError::LineNotFound {
                    product_id: product_id.as_str().to_string(),
                })?;

        let target = if quantity.is_zero() {
            Quantity::ZERO
        } else {
            let available = self
                .products
                .find_by_id(product_id)
                .await?
                .map_or(Quantity::ZERO, |p| p.stock());
            quantity.min(available)
        };

        cart.set_quantity(product_id, target)?;
        self.carts.save(&cart).await?;

        self.clamped_dto(&cart).await
    }

    /// Remove a line. Removing an absent line is not an error.
    pub async fn remove_item(
        &self,
        owner: &CartOwner,
        product_id: &ProductId,
    ) -> Result<CartDto, ServiceError> {
        let cart = match self.carts.find_by_owner(owner).await? {
            Some(mut cart) => {
                cart.remove(product_id);
                self.carts.save(&cart).await?;
                cart
            }
            None => Cart::new(owner.clone()),
        };
        self.clamped_dto(&cart).await
    }

    /// Destroy the owner's cart. Clearing an absent cart is a no-op.
    pub async fn clear(&self, owner: &CartOwner) -> Result<(), ServiceError> {
        self.carts.delete_by_owner(owner).await?;
        Ok(())
    }

    /// Merge the guest session's cart into the customer's cart at login.
    ///
    /// Shared products sum quantities; the guest cart is deleted afterwards
    /// unconditionally, even when the merge moved nothing, so anonymous
    /// carts never leak across sessions.
    pub async fn merge(
        &self,
        customer_id: CustomerId,
        guest_session: &str,
    ) -> Result<CartDto, ServiceError> {
        let guest_owner = CartOwner::guest(guest_session);
        let customer_owner = CartOwner::customer(customer_id);

        let guest_cart = self.carts.find_by_owner(&guest_owner).await?;
        let mut customer_cart = self
            .carts
            .find_by_owner(&customer_owner)
            .await?
            .unwrap_or_else(|| Cart::new(customer_owner.clone()));

        if let Some(guest_cart) = guest_cart {
            customer_cart.absorb(guest_cart);
        }

        self.carts.save(&customer_cart).await?;
        self.carts.delete_by_owner(&guest_owner).await?;

        self.clamped_dto(&customer_cart).await
    }

    async fn clamped_dto(&self, cart: &Cart) -> Result<CartDto, ServiceError> {
        let mut stock = HashMap::new();
        for line in cart.lines() {
            if let Some(product) = self.products.find_by_id(line.product_id()).await? {
                if product.is_active() {
                    stock.insert(product.id().clone(), product.stock());
                }
            }
        }
        Ok(CartDto::from_cart_clamped(cart, &stock))
    }
}
