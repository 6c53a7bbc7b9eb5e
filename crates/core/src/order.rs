//! Orders produced by checkout and payment.
//!
//! Orders are append-only records. The storefront chooses ids and timestamps;
//! this module only fixes what an order contains.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, CartSummary};
use crate::types::OrderStatus;

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// The cart the order came from. Payment orders merge several carts and
    /// carry no name.
    #[serde(default)]
    pub cart_name: Option<String>,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub total: Decimal,
    #[serde(default)]
    pub shipping_address: Option<String>,
}

impl Order {
    /// An order placed from a single cart on the checkout page.
    #[must_use]
    pub fn placed(
        id: String,
        cart_name: &str,
        items: Vec<CartItem>,
        placed_at: DateTime<Utc>,
        shipping_address: Option<String>,
    ) -> Self {
        let total = CartSummary::of(&items).total_price;
        Self {
            id,
            cart_name: Some(cart_name.to_string()),
            items,
            status: OrderStatus::OrderPlaced,
            placed_at,
            total,
            shipping_address,
        }
    }

    /// An order confirmed by the payment gateway, covering every paid item.
    #[must_use]
    pub fn confirmed(
        id: String,
        items: Vec<CartItem>,
        total: Decimal,
        placed_at: DateTime<Utc>,
        shipping_address: Option<String>,
    ) -> Self {
        Self {
            id,
            cart_name: None,
            items,
            status: OrderStatus::Confirmed,
            placed_at,
            total,
            shipping_address,
        }
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        CartSummary::of(&self.items).total_items
    }
}

/// Payment order id: `ORD-` followed by the placement time in unix millis.
#[must_use]
pub fn payment_order_id(placed_at: DateTime<Utc>) -> String {
    format!("ORD-{}", placed_at.timestamp_millis())
}
