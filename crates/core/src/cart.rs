//! Quick cart and named cart collections.
//!
//! A [`Cart`] is an ordered list of product snapshots with quantities, keyed
//! by product id: adding a product that is already present bumps its quantity.
//! A [`CartCollection`] maps shopper-chosen names to carts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// Largest quantity the quantity selector offers.
pub const MAX_QUANTITY: u32 = 10;

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity must be between 1 and {MAX_QUANTITY} (got {0})")]
    QuantityOutOfRange(u32),
    #[error("no cart named {0:?}")]
    UnknownCart(String),
    #[error("product {0} is not in the cart")]
    UnknownItem(ProductId),
}

/// A product snapshot with a quantity.
///
/// Serializes flat, as the product fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Totals shown in a cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub total_items: u32,
    pub total_price: Decimal,
}

impl CartSummary {
    /// Summarize a list of cart items.
    #[must_use]
    pub fn of(items: &[CartItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            total_items: acc.total_items.saturating_add(item.quantity),
            total_price: acc.total_price + item.line_total(),
        })
    }
}

/// An ordered list of cart items, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartItem>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// The items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.0
    }

    /// Consume the cart, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total quantity across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.summary().total_items
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.0)
    }

    /// Add `quantity` of a product, summing with an existing entry.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        match self.0.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.0.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }
    }

    /// Set the quantity of an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOutOfRange`] outside `1..=MAX_QUANTITY` and
    /// [`CartError::UnknownItem`] if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(CartError::QuantityOutOfRange(quantity));
        }
        let item = self
            .0
            .iter_mut()
            .find(|item| item.product.id == product_id)
            .ok_or(CartError::UnknownItem(product_id))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Take `quantity` of a product out of the cart, dropping the line once
    /// nothing is left. Missing products are ignored.
    pub fn deduct(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(item) = self.0.iter_mut().find(|item| item.product.id == product_id) {
            item.quantity = item.quantity.saturating_sub(quantity);
        }
        self.0.retain(|item| item.quantity > 0);
    }

    /// Remove an item. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|item| item.product.id != product_id);
        self.0.len() != before
    }
}

/// Named carts, rendered in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartCollection(BTreeMap<String, Cart>);

impl CartCollection {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Cart> {
        self.0.get(name)
    }

    /// Carts in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cart)> {
        self.0.iter().map(|(name, cart)| (name.as_str(), cart))
    }

    /// Create an empty cart.
    ///
    /// The name is trimmed. Blank or already-used names are a no-op; the
    /// return value says whether a cart was created.
    pub fn create(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.0.contains_key(name) {
            return false;
        }
        self.0.insert(name.to_string(), Cart::new());
        true
    }

    /// Delete a cart and return it.
    pub fn remove(&mut self, name: &str) -> Option<Cart> {
        self.0.remove(name)
    }

    /// Add a product to the named cart, creating the cart if needed.
    pub fn add(&mut self, name: &str, product: &Product, quantity: u32) {
        self.0
            .entry(name.trim().to_string())
            .or_default()
            .add(product, quantity);
    }

    /// Set the quantity of an item in a named cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownCart`] if no such cart exists, otherwise
    /// see [`Cart::set_quantity`].
    pub fn set_quantity(
        &mut self,
        name: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.0
            .get_mut(name)
            .ok_or_else(|| CartError::UnknownCart(name.to_string()))?
            .set_quantity(product_id, quantity)
    }

    /// Mutable access to a named cart.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cart> {
        self.0.get_mut(name)
    }

    /// Remove an item from a named cart. Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str, product_id: ProductId) -> bool {
        self.0
            .get_mut(name)
            .is_some_and(|cart| cart.remove(product_id))
    }
}
