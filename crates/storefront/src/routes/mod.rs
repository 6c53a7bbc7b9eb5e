//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page (also /main)
//! GET  /health                    - Health check
//!
//! # Products
//! GET  /products                  - Listing (?search, category, price, brand, rating)
//! GET  /product/{id}              - Product detail
//! POST /product/{id}/cart         - Add to quick cart or a named cart
//! POST /product/{id}/wishlist     - Add to quick wishlist or a named wishlist
//! POST /product/{id}/bid          - Place a bid
//! GET  /search/suggestions        - Search box suggestions (JSON)
//!
//! # Cart
//! GET  /cart                      - Quick cart and named carts
//! POST /cart/quick/update         - Set quick cart quantity
//! POST /cart/quick/remove         - Remove from quick cart
//! POST /cart/create               - Create named cart
//! POST /cart/delete               - Delete named cart
//! POST /cart/update               - Set named cart quantity
//! POST /cart/remove               - Remove from named cart
//! POST /cart/checkout             - Select carts for checkout
//!
//! # Wishlist
//! GET  /wishlist                  - Quick wishlist and named wishlists
//! POST /wishlist/quick/remove     - Remove from quick wishlist
//! POST /wishlist/quick/move       - Move quick wishlist item to quick cart
//! POST /wishlist/create           - Create named wishlist
//! POST /wishlist/delete           - Delete named wishlist
//! POST /wishlist/remove           - Remove from named wishlist
//! POST /wishlist/move             - Move item to a named cart
//! POST /wishlist/move-all         - Move everything to a same-named cart
//!
//! # Checkout & payment
//! GET  /checkout                  - Review selected carts
//! POST /checkout/place-order      - One order per selected cart
//! GET  /payment                   - Payment form (and OTP/confirm dialog)
//! POST /payment                   - Validate payment details
//! POST /payment/otp               - Submit card OTP
//! POST /payment/confirm           - Confirm UPI/PayPal payment
//! POST /payment/cancel            - Close the dialog
//! GET  /payment/confirmation      - Latest order
//!
//! # Account
//! GET  /orders                    - Order history
//! GET  /profile                   - Profile and addresses
//! POST /profile/details           - Edit name/phone
//! POST /profile/addresses         - Add address
//! POST /profile/addresses/{id}/delete - Delete address
//! GET  /profile/bids              - Bids board
//! GET  /profile/settings          - Settings
//! GET  /profile/carts             - Redirect to /cart
//! GET  /profile/wishlists         - Redirect to /wishlist
//! GET  /login, /register          - Simulated auth forms
//! POST /preferences/dark-mode     - Toggle dark mode
//! ```

pub mod auth;
pub mod bids;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod payment;
pub mod preferences;
pub mod products;
pub mod profile;
pub mod search;
pub mod wishlist;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use rust_decimal::Decimal;

use shopfront_core::cart::{Cart, CartItem};
use shopfront_core::catalog::Product;
use shopfront_core::types::Price;
use shopfront_core::wishlist::Wishlist;

use crate::error::Result;
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

/// Image shown when a product has none.
pub const FALLBACK_IMAGE: &str = "/static/images/fallback.svg";

// =============================================================================
// Shared View Data
// =============================================================================

/// Navbar data every page needs.
#[derive(Clone, Default)]
pub struct Layout {
    pub dark_mode: bool,
    /// Total quantity in the quick cart.
    pub cart_count: u32,
    /// Products in the quick wishlist.
    pub wishlist_count: usize,
}

impl Layout {
    /// Read the navbar state from visitor storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(store: &LocalStore) -> Result<Self> {
        let dark_mode: bool = store.load(keys::DARK_MODE).await?;
        let cart: Cart = store.load(keys::CART).await?;
        let wishlist: Wishlist = store.load(keys::WISHLIST).await?;
        Ok(Self {
            dark_mode,
            cart_count: cart.item_count(),
            wishlist_count: wishlist.len(),
        })
    }
}

/// Format a store-currency amount to two decimals (e.g. "₹1299.00").
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    Price::store(amount).display()
}

/// Product tile used on listings, home and wishlists.
#[derive(Clone)]
pub struct ProductCard {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub image: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: format_price(product.price),
            rating: format!("{:.1}", product.rating),
            image: product_image(product),
        }
    }
}

/// One cart line.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.as_i32(),
            name: item.product.name.clone(),
            brand: item.product.brand.clone(),
            image: product_image(&item.product),
            quantity: item.quantity,
            price: format_price(item.product.price),
            line_total: format_price(item.line_total()),
        }
    }
}

/// Image URL with the fallback applied.
#[must_use]
pub fn product_image(product: &Product) -> String {
    product
        .primary_image()
        .unwrap_or(FALLBACK_IMAGE)
        .to_string()
}

/// Treat blank form and query values as absent.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Routers
// =============================================================================

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/cart", post(products::add_to_cart))
        .route("/{id}/wishlist", post(products::add_to_wishlist))
        .route("/{id}/bid", post(bids::place))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/quick/update", post(cart::update_quick))
        .route("/quick/remove", post(cart::remove_quick))
        .route("/create", post(cart::create))
        .route("/delete", post(cart::delete))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/quick/remove", post(wishlist::remove_quick))
        .route("/quick/move", post(wishlist::move_quick))
        .route("/create", post(wishlist::create))
        .route("/delete", post(wishlist::delete))
        .route("/remove", post(wishlist::remove))
        .route("/move", post(wishlist::move_to_cart))
        .route("/move-all", post(wishlist::move_all))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(payment::show).post(payment::submit))
        .route("/otp", post(payment::submit_otp))
        .route("/confirm", post(payment::confirm))
        .route("/cancel", post(payment::cancel))
        .route("/confirmation", get(payment::confirmation))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/details", post(profile::update_details))
        .route("/addresses", post(profile::add_address))
        .route("/addresses/{id}/delete", post(profile::delete_address))
        .route("/bids", get(bids::index))
        .route("/settings", get(profile::settings))
        .route("/carts", get(|| async { Redirect::to("/cart") }))
        .route("/wishlists", get(|| async { Redirect::to("/wishlist") }))
        .route("/orders", get(|| async { Redirect::to("/orders") }))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/main", get(home::home))
        .route("/products", get(products::index))
        .nest("/product", product_routes())
        .route("/search/suggestions", get(search::suggestions))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", get(checkout::show))
        .route("/checkout/place-order", post(checkout::place_order))
        .nest("/payment", payment_routes())
        .route("/orders", get(orders::index))
        .nest("/profile", profile_routes())
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/preferences/dark-mode", post(preferences::toggle_dark_mode))
}
