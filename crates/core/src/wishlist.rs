//! Quick wishlist and named wishlist collections.
//!
//! Wishlists hold product snapshots without quantities. A product appears at
//! most once per list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cart::CartCollection;
use crate::catalog::Product;
use crate::types::ProductId;

/// An ordered list of products, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(Vec<Product>);

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.0.iter().any(|p| p.id == product_id)
    }

    /// Add a product. Returns `false` if it was already present.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.0.push(product.clone());
        true
    }

    /// Remove a product and return it.
    pub fn remove(&mut self, product_id: ProductId) -> Option<Product> {
        let index = self.0.iter().position(|p| p.id == product_id)?;
        Some(self.0.remove(index))
    }
}

/// Named wishlists, rendered in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistCollection(BTreeMap<String, Wishlist>);

impl WishlistCollection {
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
    pub fn get(&self, name: &str) -> Option<&Wishlist> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Wishlist)> {
        self.0.iter().map(|(name, list)| (name.as_str(), list))
    }

    /// Create an empty wishlist.
    ///
    /// Blank or duplicate names are a no-op; returns whether one was created.
    pub fn create(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.0.contains_key(name) {
            return false;
        }
        self.0.insert(name.to_string(), Wishlist::new());
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Wishlist> {
        self.0.remove(name)
    }

    /// Add a product to the named wishlist, creating it if needed.
    ///
    /// Returns `false` if the product was already on that list.
    pub fn add(&mut self, name: &str, product: &Product) -> bool {
        self.0
            .entry(name.trim().to_string())
            .or_default()
            .add(product)
    }

    /// Remove a product from a named wishlist and return it.
    pub fn remove_product(&mut self, name: &str, product_id: ProductId) -> Option<Product> {
        self.0.get_mut(name)?.remove(product_id)
    }

    /// Move one product into a named cart with quantity 1.
    ///
    /// Returns `false` (and leaves both collections untouched) if the product
    /// is not on the wishlist or the cart name is blank.
    pub fn move_to_cart(
        &mut self,
        name: &str,
        product_id: ProductId,
        carts: &mut CartCollection,
        cart_name: &str,
    ) -> bool {
        if cart_name.trim().is_empty() {
            return false;
        }
        match self.remove_product(name, product_id) {
            Some(product) => {
                carts.add(cart_name, &product, 1);
                true
            }
            None => false,
        }
    }

    /// Move every product into a cart of the same name and delete the
    /// wishlist.
    ///
    /// Missing or empty wishlists are left alone; returns whether anything
    /// moved.
    pub fn move_all_to_cart(&mut self, name: &str, carts: &mut CartCollection) -> bool {
        if self.0.get(name).is_none_or(Wishlist::is_empty) {
            return false;
        }
        let Some(list) = self.0.remove(name) else {
            return false;
        };
        for product in list.0 {
            carts.add(name, &product, 1);
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::tests::product;

    #[test]
    fn test_create_duplicate_name_is_noop() {
        let mut lists = WishlistCollection::new();
        assert!(lists.create("Birthday"));
        lists.add("Birthday", &product(1, Decimal::ONE));
        assert!(!lists.create("Birthday"));
        assert_eq!(lists.len(), 1);
        assert_eq!(lists.get("Birthday").unwrap().len(), 1);
    }

    #[test]
    fn test_add_deduplicates() {
        let mut list = Wishlist::new();
        let p = product(1, Decimal::ONE);
        assert!(list.add(&p));
        assert!(!list.add(&p));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_move_to_cart_sums_quantity_and_removes() {
        let mut lists = WishlistCollection::new();
        let mut carts = CartCollection::new();
        let p = product(7, Decimal::from(40));
        lists.add("Later", &p);
        carts.add("Main", &p, 2);

        assert!(lists.move_to_cart("Later", ProductId::new(7), &mut carts, "Main"));
        assert!(lists.get("Later").unwrap().is_empty());
        assert_eq!(carts.get("Main").unwrap().items()[0].quantity, 3);

        assert!(!lists.move_to_cart("Later", ProductId::new(7), &mut carts, "Main"));
    }

    #[test]
    fn test_move_to_cart_blank_cart_name_keeps_product() {
        let mut lists = WishlistCollection::new();
        let mut carts = CartCollection::new();
        lists.add("Later", &product(7, Decimal::ONE));
        assert!(!lists.move_to_cart("Later", ProductId::new(7), &mut carts, " "));
        assert_eq!(lists.get("Later").unwrap().len(), 1);
        assert!(carts.is_empty());
    }

    #[test]
    fn test_move_all_to_cart_uses_wishlist_name() {
        let mut lists = WishlistCollection::new();
        let mut carts = CartCollection::new();
        lists.add("Diwali", &product(1, Decimal::ONE));
        lists.add("Diwali", &product(2, Decimal::TWO));

        assert!(lists.move_all_to_cart("Diwali", &mut carts));
        assert!(lists.get("Diwali").is_none());
        let cart = carts.get("Diwali").unwrap();
        assert_eq!(cart.items().len(), 2);
        assert!(cart.items().iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn test_move_all_from_empty_wishlist_is_noop() {
        let mut lists = WishlistCollection::new();
        let mut carts = CartCollection::new();
        lists.create("Empty");
        assert!(!lists.move_all_to_cart("Empty", &mut carts));
        assert!(lists.get("Empty").is_some());
        assert!(carts.is_empty());
    }
}
