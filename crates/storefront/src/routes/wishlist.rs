//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::cart::{Cart, CartCollection};
use shopfront_core::types::ProductId;
use shopfront_core::wishlist::{Wishlist, WishlistCollection};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::{Layout, ProductCard};
use crate::storage::{LocalStore, keys};

/// A named wishlist with its products.
#[derive(Clone)]
pub struct NamedWishlistView {
    pub name: String,
    pub products: Vec<ProductCard>,
}

// =============================================================================
// Form Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct QuickItemForm {
    pub product_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct WishlistNameForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedItemForm {
    pub wishlist: String,
    pub product_id: i32,
}

/// Move one product into a named cart.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    pub wishlist: String,
    pub product_id: i32,
    pub cart: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveAllForm {
    pub wishlist: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist.html")]
pub struct WishlistTemplate {
    pub layout: Layout,
    pub quick: Vec<ProductCard>,
    pub wishlists: Vec<NamedWishlistView>,
    /// Existing named carts offered as move targets.
    pub cart_names: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the wishlist page.
#[instrument(skip(store))]
pub async fn show(store: LocalStore) -> Result<impl IntoResponse> {
    let quick: Wishlist = store.load(keys::WISHLIST).await?;
    let wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
    let carts: CartCollection = store.load(keys::CARTS).await?;

    Ok(WishlistTemplate {
        layout: Layout::load(&store).await?,
        quick: quick.products().iter().map(ProductCard::from).collect(),
        wishlists: wishlists
            .iter()
            .map(|(name, list)| NamedWishlistView {
                name: name.to_string(),
                products: list.products().iter().map(ProductCard::from).collect(),
            })
            .collect(),
        cart_names: carts.iter().map(|(name, _)| name.to_string()).collect(),
    })
}

/// Remove a product from the quick wishlist.
#[instrument(skip(store))]
pub async fn remove_quick(store: LocalStore, Form(form): Form<QuickItemForm>) -> Result<Redirect> {
    let mut quick: Wishlist = store.load(keys::WISHLIST).await?;
    if quick.remove(ProductId::new(form.product_id)).is_some() {
        store.save(keys::WISHLIST, &quick).await?;
    }
    Ok(Redirect::to("/wishlist"))
}

/// Move a quick wishlist product into the quick cart with quantity 1.
#[instrument(skip(store))]
pub async fn move_quick(store: LocalStore, Form(form): Form<QuickItemForm>) -> Result<Redirect> {
    let mut quick: Wishlist = store.load(keys::WISHLIST).await?;
    if let Some(product) = quick.remove(ProductId::new(form.product_id)) {
        let mut cart: Cart = store.load(keys::CART).await?;
        cart.add(&product, 1);
        store.save(keys::CART, &cart).await?;
        store.save(keys::WISHLIST, &quick).await?;
    }
    Ok(Redirect::to("/wishlist"))
}

/// Create an empty named wishlist.
#[instrument(skip(store))]
pub async fn create(store: LocalStore, Form(form): Form<WishlistNameForm>) -> Result<Redirect> {
    let mut wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
    if wishlists.create(&form.name) {
        store.save(keys::WISHLISTS, &wishlists).await?;
    }
    Ok(Redirect::to("/wishlist"))
}

/// Delete a named wishlist.
#[instrument(skip(store))]
pub async fn delete(store: LocalStore, Form(form): Form<WishlistNameForm>) -> Result<Redirect> {
    let mut wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
    if wishlists.remove(&form.name).is_some() {
        store.save(keys::WISHLISTS, &wishlists).await?;
    }
    Ok(Redirect::to("/wishlist"))
}

/// Remove a product from a named wishlist.
#[instrument(skip(store))]
pub async fn remove(store: LocalStore, Form(form): Form<NamedItemForm>) -> Result<Redirect> {
    let mut wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
    if wishlists
        .remove_product(&form.wishlist, ProductId::new(form.product_id))
        .is_some()
    {
        store.save(keys::WISHLISTS, &wishlists).await?;
    }
    Ok(Redirect::to("/wishlist"))
}

/// Move one product from a named wishlist to a named cart.
#[instrument(skip(store))]
pub async fn move_to_cart(store: LocalStore, Form(form): Form<MoveForm>) -> Result<Redirect> {
    let mut wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    if wishlists.move_to_cart(
        &form.wishlist,
        ProductId::new(form.product_id),
        &mut carts,
        &form.cart,
    ) {
        store.save(keys::WISHLISTS, &wishlists).await?;
        store.save(keys::CARTS, &carts).await?;
        add_breadcrumb("wishlist", "Moved item to cart", Some(&[("cart", &form.cart)]));
    }
    Ok(Redirect::to("/wishlist"))
}

/// Move a whole wishlist into a cart of the same name.
#[instrument(skip(store))]
pub async fn move_all(store: LocalStore, Form(form): Form<MoveAllForm>) -> Result<Redirect> {
    let mut wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    if wishlists.move_all_to_cart(&form.wishlist, &mut carts) {
        store.save(keys::WISHLISTS, &wishlists).await?;
        store.save(keys::CARTS, &carts).await?;
        add_breadcrumb(
            "wishlist",
            "Moved wishlist to cart",
            Some(&[("wishlist", &form.wishlist)]),
        );
    }
    Ok(Redirect::to("/wishlist"))
}
