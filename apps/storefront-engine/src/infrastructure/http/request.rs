//! HTTP request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::payment::PaymentMethod;

/// Request to add an item to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    /// Product to add.
    pub product_id: String,
    /// Units to add.
    pub quantity: u32,
}

/// Request to change a cart line's quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity; zero removes the line.
    pub quantity: u32,
}

/// Request to merge a guest cart into the authenticated customer's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeCartRequest {
    /// Session key of the guest cart being absorbed.
    pub guest_session: String,
}

/// Shipping destination fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddressRequest {
    /// Recipient name.
    pub recipient: String,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

/// One direct-list item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectItemRequest {
    /// Product to order.
    pub product_id: String,
    /// Units requested.
    pub quantity: u32,
}

/// Request to place an order.
///
/// With `items` present the order is built from that list; otherwise the
/// authenticated customer's cart is materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderHttpRequest {
    /// Direct item list; omit to order the cart.
    #[serde(default)]
    pub items: Option<Vec<DirectItemRequest>>,
    /// Shipping destination.
    pub shipping_address: ShippingAddressRequest,
    /// Payment method for the deposit.
    #[serde(default = "default_method")]
    pub method: PaymentMethod,
    /// Deposit paid now (at least half the total).
    pub deposit: Decimal,
}

/// Request to collect the delivery-time balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletePaymentRequest {
    /// Payment method for the balance.
    #[serde(default = "default_method")]
    pub method: PaymentMethod,
}

impl Default for CompletePaymentRequest {
    fn default() -> Self {
        Self {
            method: default_method(),
        }
    }
}

const fn default_method() -> PaymentMethod {
    PaymentMethod::Card
}

/// Request to change an order's fulfilment status (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status: OrderStatus,
}

/// Request to create a product (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    /// Display name.
    pub name: String,
    /// Unit price in dollars.
    pub unit_price: Decimal,
    /// Initial stock.
    #[serde(default)]
    pub stock: u32,
}

/// Request to add stock to a product (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockRequest {
    /// Units received.
    pub units: u32,
}
