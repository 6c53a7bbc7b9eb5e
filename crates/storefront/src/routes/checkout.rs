//! Checkout route handlers.
//!
//! Checkout reviews the carts selected on the cart page. From here the
//! shopper either places one order per cart or goes on to `/payment`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use tracing::instrument;

use shopfront_core::cart::{Cart, CartCollection};
use shopfront_core::checkout::Checkout;
use shopfront_core::order::Order;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::{CartLineView, Layout, format_price};
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

/// Length of a checkout order id.
const ORDER_ID_LEN: usize = 8;

/// One selected cart on the review page.
#[derive(Clone)]
pub struct CheckoutCartView {
    pub name: String,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
}

/// Checkout review template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub carts: Vec<CheckoutCartView>,
    pub grand_total: String,
    pub item_count: u32,
    pub shipping_address: Option<String>,
}

/// Random order id of uppercase letters and digits.
#[must_use]
pub fn order_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ORDER_ID_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

/// Review the selected carts.
///
/// Without a pending checkout there is nothing to review, so this redirects
/// to the cart page.
#[instrument(skip(state, store))]
pub async fn show(State(state): State<AppState>, store: LocalStore) -> Result<Response> {
    let checkout: Checkout = store.load(keys::CHECKOUT).await?;
    if checkout.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }
    let profile = store.profile(&state.catalog().profile).await?;

    let carts = checkout
        .carts()
        .iter()
        .map(|cart| CheckoutCartView {
            name: cart.name.clone(),
            lines: cart.items.iter().map(CartLineView::from).collect(),
            subtotal: format_price(cart.summary().total_price),
        })
        .collect();

    Ok(CheckoutTemplate {
        layout: Layout::load(&store).await?,
        carts,
        grand_total: format_price(checkout.grand_total()),
        item_count: checkout.item_count(),
        shipping_address: profile.primary_address().map(str::to_string),
    }
    .into_response())
}

/// Place one "Order Placed" order per selected cart.
#[instrument(skip(state, store))]
pub async fn place_order(State(state): State<AppState>, store: LocalStore) -> Result<Redirect> {
    let checkout: Checkout = store.load(keys::CHECKOUT).await?;
    if checkout.is_empty() {
        return Ok(Redirect::to("/cart"));
    }
    let profile = store.profile(&state.catalog().profile).await?;

    let placed = checkout.place_orders(order_id, Utc::now(), profile.primary_address());
    let mut orders: Vec<Order> = store.load(keys::ORDERS).await?;
    orders.extend(placed.iter().cloned());
    store.save(keys::ORDERS, &orders).await?;

    let mut cart: Cart = store.load(keys::CART).await?;
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    checkout.clear_sources(&mut cart, &mut carts);
    store.save(keys::CART, &cart).await?;
    store.save(keys::CARTS, &carts).await?;
    store.clear(keys::CHECKOUT).await?;

    let count = placed.len().to_string();
    add_breadcrumb("checkout", "Placed orders", Some(&[("orders", &count)]));
    tracing::info!(orders = placed.len(), "Orders placed");

    Ok(Redirect::to("/orders"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shape() {
        let id = order_id();
        assert_eq!(id.len(), ORDER_ID_LEN);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
