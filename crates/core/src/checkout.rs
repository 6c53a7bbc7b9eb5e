//! Pending checkout: the carts a shopper selected for ordering.
//!
//! A checkout holds snapshots of the selected carts. The snapshotted
//! quantities leave the source carts only once the orders exist, so
//! abandoning checkout loses nothing and later additions stay in the cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartCollection, CartItem, CartSummary};
use crate::order::{Order, payment_order_id};

/// Display name for the quick cart when it is checked out.
pub const QUICK_CART_NAME: &str = "Quick Cart";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("select at least one cart with items to check out")]
    NothingSelected,
}

/// Snapshot of one selected cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutCart {
    pub name: String,
    /// Whether this is the quick cart rather than a named one.
    #[serde(default)]
    pub quick: bool,
    pub items: Vec<CartItem>,
}

impl CheckoutCart {
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    carts: Vec<CheckoutCart>,
}

impl Checkout {
    /// Snapshot the selected carts.
    ///
    /// `names` are named carts in selection order; unknown, repeated and empty
    /// carts are skipped. The quick cart goes first when given and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NothingSelected`] if no selected cart has items.
    pub fn select(
        quick: Option<&Cart>,
        carts: &CartCollection,
        names: &[String],
    ) -> Result<Self, CheckoutError> {
        let mut selected = Vec::new();
        if let Some(cart) = quick.filter(|cart| !cart.is_empty()) {
            selected.push(CheckoutCart {
                name: QUICK_CART_NAME.to_string(),
                quick: true,
                items: cart.items().to_vec(),
            });
        }
        for name in names {
            let already = selected.iter().any(|c| !c.quick && c.name == *name);
            match carts.get(name) {
                Some(cart) if !cart.is_empty() && !already => selected.push(CheckoutCart {
                    name: name.clone(),
                    quick: false,
                    items: cart.items().to_vec(),
                }),
                _ => {}
            }
        }
        if selected.is_empty() {
            return Err(CheckoutError::NothingSelected);
        }
        Ok(Self { carts: selected })
    }

    #[must_use]
    pub fn carts(&self) -> &[CheckoutCart] {
        &self.carts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Sum of every selected cart's total.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.carts.iter().map(|c| c.summary().total_price).sum()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.carts
            .iter()
            .map(|c| c.summary().total_items)
            .fold(0, u32::saturating_add)
    }

    /// One "Order Placed" order per selected cart.
    pub fn place_orders(
        &self,
        mut next_id: impl FnMut() -> String,
        placed_at: DateTime<Utc>,
        shipping_address: Option<&str>,
    ) -> Vec<Order> {
        self.carts
            .iter()
            .map(|cart| {
                Order::placed(
                    next_id(),
                    &cart.name,
                    cart.items.clone(),
                    placed_at,
                    shipping_address.map(str::to_string),
                )
            })
            .collect()
    }

    /// A single "Confirmed" order covering every selected item.
    #[must_use]
    pub fn payment_order(&self, placed_at: DateTime<Utc>, shipping_address: Option<&str>) -> Order {
        let items = self
            .carts
            .iter()
            .flat_map(|cart| cart.items.iter().cloned())
            .collect();
        Order::confirmed(
            payment_order_id(placed_at),
            items,
            self.grand_total(),
            placed_at,
            shipping_address.map(str::to_string),
        )
    }

    /// Take the ordered quantities out of the shopper's carts.
    ///
    /// A named cart is deleted once nothing is left in it. Items added after
    /// the snapshot was taken stay where they are.
    pub fn clear_sources(&self, quick: &mut Cart, carts: &mut CartCollection) {
        for snapshot in &self.carts {
            let live = if snapshot.quick {
                Some(&mut *quick)
            } else {
                carts.get_mut(&snapshot.name)
            };
            let Some(live) = live else { continue };
            for item in &snapshot.items {
                live.deduct(item.product.id, item.quantity);
            }
            if !snapshot.quick && live.is_empty() {
                carts.remove(&snapshot.name);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::cart::tests::product;
    use crate::types::{OrderStatus, ProductId};

    fn carts() -> CartCollection {
        let mut carts = CartCollection::new();
        carts.add("Home", &product(1, Decimal::from(100)), 2);
        carts.add("Office", &product(2, Decimal::new(2550, 2)), 1);
        carts.create("Empty");
        carts
    }

    fn selection() -> Vec<String> {
        vec!["Home".to_string(), "Office".to_string()]
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_select_skips_empty_and_unknown() {
        let carts = carts();
        let names: Vec<String> = ["Home", "Empty", "Nope", "Home"]
            .into_iter()
            .map(String::from)
            .collect();
        let checkout = Checkout::select(None, &carts, &names).unwrap();
        assert_eq!(checkout.carts().len(), 1);
        assert_eq!(checkout.carts()[0].name, "Home");
    }

    #[test]
    fn test_select_nothing_is_rejected() {
        let carts = carts();
        assert_eq!(
            Checkout::select(None, &carts, &["Empty".to_string()]),
            Err(CheckoutError::NothingSelected)
        );
        assert_eq!(
            Checkout::select(Some(&Cart::new()), &carts, &[]),
            Err(CheckoutError::NothingSelected)
        );
    }

    #[test]
    fn test_grand_total_spans_carts() {
        let mut quick = Cart::new();
        quick.add(&product(9, Decimal::TEN), 1);
        let checkout =
            Checkout::select(Some(&quick), &carts(), &selection()).unwrap();
        assert_eq!(checkout.carts()[0].name, QUICK_CART_NAME);
        assert_eq!(checkout.grand_total(), Decimal::new(23550, 2));
        assert_eq!(checkout.item_count(), 4);
    }

    #[test]
    fn test_place_orders_one_per_cart_and_clear() {
        let mut carts = carts();
        let mut quick = Cart::new();
        quick.add(&product(9, Decimal::TEN), 1);
        let checkout =
            Checkout::select(Some(&quick), &carts, &selection()).unwrap();

        let mut n = 0;
        let orders = checkout.place_orders(
            || {
                n += 1;
                format!("ID{n}")
            },
            at(),
            Some("12 MG Road"),
        );
        assert_eq!(orders.len(), 3);
        assert!(orders.iter().all(|o| o.status == OrderStatus::OrderPlaced));
        assert_eq!(orders[1].id, "ID2");
        assert_eq!(orders[1].total, Decimal::from(200));
        assert_eq!(orders[2].shipping_address.as_deref(), Some("12 MG Road"));

        checkout.clear_sources(&mut quick, &mut carts);
        assert!(quick.is_empty());
        assert!(carts.get("Home").is_none());
        assert!(carts.get("Office").is_none());
        assert!(carts.get("Empty").is_some());
    }

    #[test]
    fn test_clear_sources_keeps_items_added_after_selection() {
        let mut carts = carts();
        let mut quick = Cart::new();
        quick.add(&product(9, Decimal::TEN), 1);
        let checkout =
            Checkout::select(Some(&quick), &carts, &["Home".to_string()]).unwrap();

        carts.add("Home", &product(4, Decimal::from(399)), 1);
        carts.add("Home", &product(1, Decimal::from(100)), 1);
        quick.add(&product(5, Decimal::ONE), 2);

        checkout.clear_sources(&mut quick, &mut carts);
        let home = carts.get("Home").unwrap();
        assert_eq!(home.items().len(), 2);
        assert_eq!(home.items()[0].product.id, ProductId::new(1));
        assert_eq!(home.items()[0].quantity, 1);
        assert_eq!(home.items()[1].product.id, ProductId::new(4));
        assert_eq!(quick.items().len(), 1);
        assert_eq!(quick.items()[0].product.id, ProductId::new(5));
        assert!(carts.get("Office").is_some());
    }

    #[test]
    fn test_payment_order_merges_items() {
        let checkout =
            Checkout::select(None, &carts(), &selection()).unwrap();
        let order = checkout.payment_order(at(), None);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, Decimal::new(22550, 2));
        assert!(order.id.starts_with("ORD-"));
        assert!(order.cart_name.is_none());
    }
}
