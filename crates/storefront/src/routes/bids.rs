//! Bid route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::bid::{Bid, BidBoard, place_bid};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::products::{ProductShowTemplate, find_product};
use crate::routes::{FALLBACK_IMAGE, Layout};
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

/// Bid display data.
#[derive(Clone)]
pub struct BidView {
    pub product_id: i32,
    pub product_name: String,
    pub image: String,
    pub current_bid: String,
    pub your_bid: String,
    pub final_price: String,
    pub time_left: String,
    pub status: &'static str,
    pub favourable: bool,
    pub bid_count: u32,
    pub end_date: String,
}

impl From<&Bid> for BidView {
    fn from(bid: &Bid) -> Self {
        Self {
            product_id: bid.product_id.as_i32(),
            product_name: bid.product_name.clone(),
            image: bid
                .product_image
                .clone()
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
            current_bid: bid.current_bid_display(),
            your_bid: bid.your_bid_display(),
            final_price: bid.final_price_display(),
            time_left: bid.time_left.clone(),
            status: bid.status.label(),
            favourable: bid.status.is_favourable(),
            bid_count: bid.bids,
            end_date: bid.end_date.format("%d %b %Y").to_string(),
        }
    }
}

/// Tab on the bids page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidTab {
    #[default]
    Active,
    Past,
}

#[derive(Debug, Default, Deserialize)]
pub struct BidsQuery {
    #[serde(default)]
    pub tab: BidTab,
    pub placed: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct BidForm {
    pub amount: String,
}

/// Bids page template.
#[derive(Template, WebTemplate)]
#[template(path = "bids.html")]
pub struct BidsTemplate {
    pub layout: Layout,
    pub past_tab: bool,
    pub active_count: usize,
    pub past_count: usize,
    pub bids: Vec<BidView>,
    pub placed: bool,
}

/// The visitor's bids ahead of the seeded auctions.
async fn board(state: &AppState, store: &LocalStore) -> Result<(Vec<Bid>, BidBoard)> {
    let placed: Vec<Bid> = store.load(keys::BIDS).await?;
    let board = BidBoard::combine(&placed, &state.catalog().bids.bids);
    Ok((placed, board))
}

/// Display active or past bids.
#[instrument(skip(state, store))]
pub async fn index(
    State(state): State<AppState>,
    store: LocalStore,
    Query(query): Query<BidsQuery>,
) -> Result<impl IntoResponse> {
    let (_, board) = board(&state, &store).await?;
    let active: Vec<BidView> = board.active().map(BidView::from).collect();
    let past: Vec<BidView> = board.past().map(BidView::from).collect();

    Ok(BidsTemplate {
        layout: Layout::load(&store).await?,
        past_tab: query.tab == BidTab::Past,
        active_count: active.len(),
        past_count: past.len(),
        bids: match query.tab {
            BidTab::Active => active,
            BidTab::Past => past,
        },
        placed: query.placed.is_some(),
    })
}

/// Place a bid from the product page.
///
/// A rejected amount re-renders the product page with the message.
#[instrument(skip(state, store))]
pub async fn place(
    State(state): State<AppState>,
    store: LocalStore,
    Path(id): Path<String>,
    Form(form): Form<BidForm>,
) -> Result<Response> {
    let product = find_product(&state, &id)?;
    let (mut placed, board) = board(&state, &store).await?;

    match place_bid(product, &form.amount, board.next_id(), Utc::now()) {
        Ok(bid) => {
            let amount = bid.your_bid_display();
            placed.insert(0, bid);
            store.save(keys::BIDS, &placed).await?;
            add_breadcrumb("bid", "Placed bid", Some(&[("amount", &amount)]));
            Ok(Redirect::to("/profile/bids?placed=1").into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bid rejected");
            let mut page = ProductShowTemplate::build(&store, product, None).await?;
            page.bid_error = Some(e.to_string());
            page.bid_amount = form.amount;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}
