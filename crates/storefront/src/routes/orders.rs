//! Order history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use shopfront_core::order::Order;
use shopfront_core::types::OrderStatus;

use crate::error::Result;
use crate::filters;
use crate::routes::{CartLineView, Layout, format_price};
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

/// Shown when neither the order nor the profile has an address.
const NO_ADDRESS: &str = "No address on file";

/// Order display data.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub status: String,
    pub confirmed: bool,
    pub date: String,
    pub total: String,
    pub lines: Vec<CartLineView>,
    pub address: String,
}

impl OrderView {
    fn new(order: &Order, fallback_address: Option<&str>) -> Self {
        Self {
            id: order.id.clone(),
            status: order.status.label().to_string(),
            confirmed: order.status == OrderStatus::Confirmed,
            date: order.placed_at.format("%d %b %Y").to_string(),
            total: format_price(order.total),
            lines: order.items.iter().map(CartLineView::from).collect(),
            address: order
                .shipping_address
                .as_deref()
                .or(fallback_address)
                .unwrap_or(NO_ADDRESS)
                .to_string(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderView>,
}

/// Display the order history in placement order.
#[instrument(skip(state, store))]
pub async fn index(State(state): State<AppState>, store: LocalStore) -> Result<impl IntoResponse> {
    let orders: Vec<Order> = store.load(keys::ORDERS).await?;
    let profile = store.profile(&state.catalog().profile).await?;
    let fallback = profile.primary_address();

    Ok(OrdersTemplate {
        layout: Layout::load(&store).await?,
        orders: orders.iter().map(|o| OrderView::new(o, fallback)).collect(),
    })
}
