//! Cart route handlers.
//!
//! The quick cart and named carts share one page. Every action is a plain
//! form POST that redirects back to `/cart`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::cart::{Cart, CartCollection, CartError, CartSummary, MAX_QUANTITY};
use shopfront_core::checkout::Checkout;
use shopfront_core::types::ProductId;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::{CartLineView, Layout, format_price, non_blank};
use crate::storage::{LocalStore, keys};

// =============================================================================
// View Types
// =============================================================================

/// Totals line under a cart.
#[derive(Clone)]
pub struct SummaryView {
    pub total_items: u32,
    pub total_price: String,
}

impl From<CartSummary> for SummaryView {
    fn from(summary: CartSummary) -> Self {
        Self {
            total_items: summary.total_items,
            total_price: format_price(summary.total_price),
        }
    }
}

/// A named cart with its lines.
#[derive(Clone)]
pub struct NamedCartView {
    pub name: String,
    pub lines: Vec<CartLineView>,
    pub summary: SummaryView,
}

/// Errors shown at the top of the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartPageError {
    NothingSelected,
    Quantity,
    DuplicateName,
}

impl CartPageError {
    const fn as_str(self) -> &'static str {
        match self {
            Self::NothingSelected => "nothing-selected",
            Self::Quantity => "quantity",
            Self::DuplicateName => "duplicate",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "nothing-selected" => Some(Self::NothingSelected),
            "quantity" => Some(Self::Quantity),
            "duplicate" => Some(Self::DuplicateName),
            _ => None,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::NothingSelected => "Select at least one cart with items to check out.",
            Self::Quantity => "Please choose a quantity between 1 and 10.",
            Self::DuplicateName => "Enter a cart name that is not already in use.",
        }
    }
}

fn error_redirect(error: CartPageError) -> Redirect {
    Redirect::to(&format!("/cart?error={}", error.as_str()))
}

// =============================================================================
// Query & Form Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    pub error: Option<String>,
}

/// Quick cart quantity form.
#[derive(Debug, Deserialize)]
pub struct QuickQuantityForm {
    pub product_id: i32,
    pub quantity: u32,
}

/// Quick cart removal form.
#[derive(Debug, Deserialize)]
pub struct QuickRemoveForm {
    pub product_id: i32,
}

/// Form naming a cart.
#[derive(Debug, Deserialize)]
pub struct CartNameForm {
    pub name: String,
}

/// Named cart quantity form.
#[derive(Debug, Deserialize)]
pub struct NamedQuantityForm {
    pub cart: String,
    pub product_id: i32,
    pub quantity: u32,
}

/// Named cart removal form.
#[derive(Debug, Deserialize)]
pub struct NamedRemoveForm {
    pub cart: String,
    pub product_id: i32,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub layout: Layout,
    pub quick_lines: Vec<CartLineView>,
    pub quick_summary: SummaryView,
    pub carts: Vec<NamedCartView>,
    pub max_quantity: u32,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(store))]
pub async fn show(store: LocalStore, Query(query): Query<CartQuery>) -> Result<impl IntoResponse> {
    let cart: Cart = store.load(keys::CART).await?;
    let carts: CartCollection = store.load(keys::CARTS).await?;

    let named = carts
        .iter()
        .map(|(name, cart)| NamedCartView {
            name: name.to_string(),
            lines: cart.items().iter().map(CartLineView::from).collect(),
            summary: cart.summary().into(),
        })
        .collect();

    Ok(CartTemplate {
        layout: Layout::load(&store).await?,
        quick_lines: cart.items().iter().map(CartLineView::from).collect(),
        quick_summary: cart.summary().into(),
        carts: named,
        max_quantity: MAX_QUANTITY,
        error: query
            .error
            .as_deref()
            .and_then(CartPageError::parse)
            .map(|e| e.message().to_string()),
    })
}

/// Set a quick cart line's quantity.
#[instrument(skip(store))]
pub async fn update_quick(store: LocalStore, Form(form): Form<QuickQuantityForm>) -> Result<Redirect> {
    let mut cart: Cart = store.load(keys::CART).await?;
    match cart.set_quantity(ProductId::new(form.product_id), form.quantity) {
        Ok(()) => {
            store.save(keys::CART, &cart).await?;
            Ok(Redirect::to("/cart"))
        }
        Err(CartError::QuantityOutOfRange(_)) => Ok(error_redirect(CartPageError::Quantity)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring quick cart update");
            Ok(Redirect::to("/cart"))
        }
    }
}

/// Remove a line from the quick cart.
#[instrument(skip(store))]
pub async fn remove_quick(store: LocalStore, Form(form): Form<QuickRemoveForm>) -> Result<Redirect> {
    let mut cart: Cart = store.load(keys::CART).await?;
    if cart.remove(ProductId::new(form.product_id)) {
        store.save(keys::CART, &cart).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Create an empty named cart.
#[instrument(skip(store))]
pub async fn create(store: LocalStore, Form(form): Form<CartNameForm>) -> Result<Redirect> {
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    if carts.create(&form.name) {
        store.save(keys::CARTS, &carts).await?;
        add_breadcrumb("cart", "Created cart", None);
        Ok(Redirect::to("/cart"))
    } else {
        Ok(error_redirect(CartPageError::DuplicateName))
    }
}

/// Delete a named cart.
#[instrument(skip(store))]
pub async fn delete(store: LocalStore, Form(form): Form<CartNameForm>) -> Result<Redirect> {
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    if carts.remove(&form.name).is_some() {
        store.save(keys::CARTS, &carts).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Set a named cart line's quantity.
#[instrument(skip(store))]
pub async fn update(store: LocalStore, Form(form): Form<NamedQuantityForm>) -> Result<Redirect> {
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    match carts.set_quantity(&form.cart, ProductId::new(form.product_id), form.quantity) {
        Ok(()) => {
            store.save(keys::CARTS, &carts).await?;
            Ok(Redirect::to("/cart"))
        }
        Err(CartError::QuantityOutOfRange(_)) => Ok(error_redirect(CartPageError::Quantity)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring named cart update");
            Ok(Redirect::to("/cart"))
        }
    }
}

/// Remove a line from a named cart.
#[instrument(skip(store))]
pub async fn remove(store: LocalStore, Form(form): Form<NamedRemoveForm>) -> Result<Redirect> {
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    if carts.remove_item(&form.cart, ProductId::new(form.product_id)) {
        store.save(keys::CARTS, &carts).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Selected carts from the checkout form body.
///
/// The form repeats `cart` once per ticked named cart and sends `quick` when
/// the quick cart is ticked.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CartSelection {
    pub quick: bool,
    pub names: Vec<String>,
}

impl CartSelection {
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let mut selection = Self::default();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            match key.as_ref() {
                "quick" => selection.quick = true,
                "cart" => {
                    if let Some(name) = non_blank(Some(value.into_owned())) {
                        selection.names.push(name);
                    }
                }
                _ => {}
            }
        }
        selection
    }
}

/// Snapshot the ticked carts and go to checkout.
#[instrument(skip(store, body))]
pub async fn checkout(store: LocalStore, body: String) -> Result<Redirect> {
    let selection = CartSelection::parse(&body);
    let cart: Cart = store.load(keys::CART).await?;
    let carts: CartCollection = store.load(keys::CARTS).await?;

    let quick = selection.quick.then_some(&cart);
    match Checkout::select(quick, &carts, &selection.names) {
        Ok(checkout) => {
            store.save(keys::CHECKOUT, &checkout).await?;
            store.clear(keys::PAYMENT).await?;
            let count = checkout.carts().len().to_string();
            add_breadcrumb("checkout", "Selected carts", Some(&[("carts", &count)]));
            Ok(Redirect::to("/checkout"))
        }
        Err(e) => {
            tracing::debug!(error = %e, "Checkout selection rejected");
            Ok(error_redirect(CartPageError::NothingSelected))
        }
    }
}
