//! Cart DTOs for the API boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::shared::{ProductId, Quantity};

/// One cart line, as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineDto {
    /// Referenced product.
    pub product_id: String,
    /// Name snapshot.
    pub name: String,
    /// Quantity, clamped to live stock on read.
    pub quantity: u32,
    /// Unit price captured at add time.
    pub price_at_addition: Decimal,
    /// Line total at the clamped quantity.
    pub line_total: Decimal,
}

/// A cart, as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartDto {
    /// Cart ID.
    pub id: String,
    /// Owner key.
    pub owner: String,
    /// Lines in insertion order.
    pub lines: Vec<CartLineDto>,
    /// Subtotal over the clamped lines.
    pub subtotal: Decimal,
    /// Last update time.
    pub updated_at: String,
}

impl CartDto {
    /// Build a DTO with each quantity clamped to live stock.
    ///
    /// Products absent from `stock_by_product` (vanished or deactivated)
    /// clamp to zero. Enforcement is soft: the cart record itself is not
    /// rewritten, only the view.
    #[must_use]
    pub fn from_cart_clamped(cart: &Cart, stock_by_product: &HashMap<ProductId, Quantity>) -> Self {
        let lines: Vec<CartLineDto> = cart
            .lines()
            .iter()
            .map(|line| {
                let available = stock_by_product
                    .get(line.product_id())
                    .copied()
                    .unwrap_or(Quantity::ZERO);
                Self::line_dto(line, line.quantity().min(available))
            })
            .collect();

        let subtotal: Decimal = lines.iter().map(|l| l.line_total).sum();

        Self {
            id: cart.id().as_str().to_string(),
            owner: cart.owner().key(),
            lines,
            subtotal,
            updated_at: cart.updated_at().to_rfc3339(),
        }
    }

    fn line_dto(line: &CartLine, quantity: Quantity) -> CartLineDto {
        CartLineDto {
            product_id: line.product_id().as_str().to_string(),
            name: line.name().to_string(),
            quantity: quantity.value(),
            price_at_addition: line.price_at_addition().amount(),
            line_total: (line.price_at_addition() * quantity.value()).amount(),
        }
    }
}
