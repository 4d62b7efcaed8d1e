//! Cart Aggregate Root
//!
//! Accumulates pending lines for one owner (customer or guest session).
//! Stock checks against the live catalog happen in the application layer;
//! the aggregate itself only enforces line-shape invariants and the merge
//! semantics.

use serde::{Deserialize, Serialize};

use super::CartLine;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::value_objects::CartOwner;
use crate::domain::shared::{CartId, Money, ProductId, Quantity, Timestamp};

/// Cart Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    owner: CartOwner,
    lines: Vec<CartLine>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Cart {
    /// Create an empty cart for an owner.
    ///
    /// Carts are created lazily: the first add materializes the aggregate.
    #[must_use]
    pub fn new(owner: CartOwner) -> Self {
        let now = Timestamp::now();
        Self {
            id: CartId::generate(),
            owner,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the cart ID.
    #[must_use]
    pub const fn id(&self) -> &CartId {
        &self.id
    }

    /// Get the owner.
    #[must_use]
    pub const fn owner(&self) -> &CartOwner {
        &self.owner
    }

    /// Get the lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns true if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Find a line by product.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Subtotal at snapshot prices.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add a line. If a line for the same product exists, quantities sum and
    /// the original snapshot (price, added-at) is kept.
    pub fn add(&mut self, line: CartLine) {
        match self
            .lines
            .iter_mut()
            .find(|l| l.product_id() == line.product_id())
        {
            Some(existing) => existing.increase_quantity(line.quantity()),
            None => self.lines.push(line),
        }
        self.touch();
    }

    /// Set the quantity of an existing line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` if no line references the product.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id() == product_id)
            .ok_or_else(|| CartError::LineNotFound {
                product_id: product_id.as_str().to_string(),
            })?;

        if quantity.is_zero() {
            self.lines.retain(|l| l.product_id() != product_id);
        } else {
            line.set_quantity(quantity);
        }
        self.touch();
        Ok(())
    }

    /// Remove a line. Removing an absent line is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        if self.lines.len() != before {
            self.touch();
        }
    }

    /// Drop every line. Clearing an empty cart is a no-op.
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.touch();
        }
    }

    /// Fold another cart's lines into this one.
    ///
    /// Shared products sum quantities (this cart's snapshot wins); new
    /// products move across unchanged. Used when a guest cart merges into a
    /// customer cart at login; the caller deletes the guest cart afterwards
    /// regardless of whether anything moved.
    pub fn absorb(&mut self, other: Cart) {
        for line in other.lines {
            self.add(line);
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::CustomerId;

    fn line(product: &str, qty: u32, cents: i64) -> CartLine {
        CartLine::new(
            ProductId::new(product),
            format!("Product {product}"),
            Quantity::new(qty),
            Money::from_cents(cents),
        )
        .unwrap()
    }

    fn customer_cart() -> Cart {
        Cart::new(CartOwner::customer(CustomerId::new("c-1")))
    }

    #[test]
    fn add_merges_same_product() {
        let mut cart = customer_cart();
        cart.add(line("p-1", 2, 1000));
        cart.add(line("p-1", 1, 1200)); // later snapshot ignored

        assert_eq!(cart.line_count(), 1);
        let merged = cart.line(&ProductId::new("p-1")).unwrap();
        assert_eq!(merged.quantity(), Quantity::new(3));
        assert_eq!(merged.price_at_addition(), Money::from_cents(1000));
    }

    #[test]
    fn subtotal_sums_snapshot_prices() {
        let mut cart = customer_cart();
        cart.add(line("p-1", 3, 5000));
        cart.add(line("p-2", 1, 250));

        assert_eq!(cart.subtotal(), Money::from_cents(15250));
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = customer_cart();
        cart.add(line("p-1", 2, 1000));

        cart.set_quantity(&ProductId::new("p-1"), Quantity::ZERO)
            .unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_missing_line_fails() {
        let mut cart = customer_cart();
        let result = cart.set_quantity(&ProductId::new("ghost"), Quantity::new(1));
        assert!(matches!(result, Err(CartError::LineNotFound { .. })));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = customer_cart();
        cart.add(line("p-1", 1, 100));

        cart.remove(&ProductId::new("p-1"));
        cart.remove(&ProductId::new("p-1")); // second remove is a no-op
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empty_cart_is_noop() {
        let mut cart = customer_cart();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn absorb_sums_shared_and_moves_new() {
        let mut user = customer_cart();
        user.add(line("p-1", 2, 1000));

        let mut guest = Cart::new(CartOwner::guest("sess-1"));
        guest.add(line("p-1", 3, 1100));
        guest.add(line("p-2", 1, 500));

        user.absorb(guest);

        assert_eq!(user.line_count(), 2);
        assert_eq!(
            user.line(&ProductId::new("p-1")).unwrap().quantity(),
            Quantity::new(5)
        );
        assert_eq!(
            user.line(&ProductId::new("p-2")).unwrap().quantity(),
            Quantity::new(1)
        );
    }

    #[test]
    fn absorb_into_empty_cart() {
        let mut user = customer_cart();
        let mut guest = Cart::new(CartOwner::guest("sess-1"));
        guest.add(line("p-9", 4, 200));

        user.absorb(guest);
        assert_eq!(user.line_count(), 1);
        assert_eq!(
            user.line(&ProductId::new("p-9")).unwrap().quantity(),
            Quantity::new(4)
        );
    }

    #[test]
    fn cart_serde_roundtrip() {
        let mut cart = customer_cart();
        cart.add(line("p-1", 2, 1000));

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id(), cart.id());
        assert_eq!(parsed.line_count(), 1);
    }
}
