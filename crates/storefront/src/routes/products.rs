//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::cart::{Cart, CartCollection, MAX_QUANTITY};
use shopfront_core::catalog::{PriceRange, Product, ProductFilter};
use shopfront_core::types::ProductId;
use shopfront_core::wishlist::{Wishlist, WishlistCollection};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::{Layout, ProductCard, format_price, non_blank, product_image};
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

// =============================================================================
// View Types
// =============================================================================

/// An `<option>` in a filter select.
#[derive(Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, current: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: current == Some(value),
        }
    }
}

/// Review display data.
#[derive(Clone)]
pub struct ReviewView {
    pub user: String,
    pub rating: String,
    pub comment: String,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: String,
    pub rating: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub description: String,
    pub features: Vec<String>,
    pub seller_name: Option<String>,
    pub return_policy: Option<String>,
    pub warranty: Option<String>,
    pub reviews: Vec<ReviewView>,
    pub in_stock: bool,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let description = product.description.clone().unwrap_or_else(|| {
            format!(
                "Experience the best quality with {}. Designed for durability, performance, and style. Get yours today!",
                product.name
            )
        });
        let seller = product.seller.as_ref();
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            price: format_price(product.price),
            rating: format!("{:.1}", product.rating),
            image: product_image(product),
            gallery: product.images.clone(),
            description,
            features: product.features.clone(),
            seller_name: seller.map(|s| s.seller_name.clone()),
            return_policy: seller.and_then(|s| s.return_policy.clone()),
            warranty: seller.and_then(|s| s.warranty.clone()),
            reviews: product
                .reviews
                .iter()
                .map(|r| ReviewView {
                    user: r.user.clone(),
                    rating: format!("{:.1}", r.rating),
                    comment: r.comment.clone(),
                })
                .collect(),
            in_stock: product.in_stock,
        }
    }
}

/// Flash messages shown after a product action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AddedToCart,
    AddedToWishlist,
    AlreadyInWishlist,
}

impl Notice {
    const fn as_str(self) -> &'static str {
        match self {
            Self::AddedToCart => "cart",
            Self::AddedToWishlist => "wishlist",
            Self::AlreadyInWishlist => "wishlist-exists",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "cart" => Some(Self::AddedToCart),
            "wishlist" => Some(Self::AddedToWishlist),
            "wishlist-exists" => Some(Self::AlreadyInWishlist),
            _ => None,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::AddedToCart => "Item added to cart!",
            Self::AddedToWishlist => "Added to wishlist!",
            Self::AlreadyInWishlist => "Already in your wishlist.",
        }
    }
}

// =============================================================================
// Query & Form Types
// =============================================================================

/// Listing filters from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<String>,
}

impl ListingQuery {
    /// Convert to a filter. Blank and unparseable values are dropped.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter {
            search: non_blank(self.search.clone()),
            category: non_blank(self.category.clone()),
            price_range: self.price.as_deref().and_then(PriceRange::parse),
            brand: non_blank(self.brand.clone()),
            min_rating: self
                .rating
                .as_deref()
                .and_then(|r| r.trim().parse::<f64>().ok())
                .filter(|r| r.is_finite()),
        }
    }
}

/// Query string on the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct ShowQuery {
    pub notice: Option<String>,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub quantity: Option<u32>,
    /// Named cart; blank means the quick cart.
    pub cart: Option<String>,
}

/// Add to wishlist form data.
#[derive(Debug, Deserialize)]
pub struct AddToWishlistForm {
    /// Named wishlist; blank means the quick wishlist.
    pub wishlist: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub title: String,
    pub products: Vec<ProductCard>,
    pub search: String,
    pub categories: Vec<SelectOption>,
    pub price_ranges: Vec<SelectOption>,
    pub brands: Vec<SelectOption>,
    pub ratings: Vec<SelectOption>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductDetailView,
    pub cart_names: Vec<String>,
    pub wishlist_names: Vec<String>,
    pub quantities: Vec<u32>,
    pub notice: Option<String>,
    pub bid_error: Option<String>,
    pub bid_amount: String,
}

impl ProductShowTemplate {
    /// Build the detail page for `product`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn build(
        store: &LocalStore,
        product: &Product,
        notice: Option<Notice>,
    ) -> Result<Self> {
        let carts: CartCollection = store.load(keys::CARTS).await?;
        let wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
        Ok(Self {
            layout: Layout::load(store).await?,
            product: ProductDetailView::from(product),
            cart_names: carts.iter().map(|(name, _)| name.to_string()).collect(),
            wishlist_names: wishlists.iter().map(|(name, _)| name.to_string()).collect(),
            quantities: (1..=MAX_QUANTITY).collect(),
            notice: notice.map(|n| n.message().to_string()),
            bid_error: None,
            bid_amount: String::new(),
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Look up a product by the raw path segment.
///
/// # Errors
///
/// Returns `AppError::NotFound` for unparseable or unknown ids.
pub fn find_product<'a>(state: &'a AppState, id: &str) -> Result<&'a Product> {
    id.parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().product(id))
        .ok_or_else(|| AppError::NotFound("Product not found.".to_string()))
}

/// Display product listing page.
#[instrument(skip(state, store))]
pub async fn index(
    State(state): State<AppState>,
    store: LocalStore,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let filter = query.to_filter();

    let products = filter
        .apply(&catalog.products)
        .into_iter()
        .map(ProductCard::from)
        .collect();

    let category = filter.category.as_deref();
    let categories = catalog
        .categories
        .iter()
        .map(|c| SelectOption::new(&c.name, &c.name, category))
        .collect();

    let price = filter.price_range.map(PriceRange::as_str);
    let price_ranges = PriceRange::all()
        .into_iter()
        .map(|r| SelectOption::new(r.as_str(), r.label(), price))
        .collect();

    let brand = filter.brand.as_deref();
    let brands = catalog
        .brands()
        .into_iter()
        .map(|b| SelectOption::new(b, b, brand))
        .collect();

    let rating = query.rating.as_deref().map(str::trim);
    let ratings = ["4", "3", "2"]
        .into_iter()
        .map(|r| SelectOption::new(r, &format!("{r}★ & above"), rating))
        .collect();

    Ok(ProductsIndexTemplate {
        layout: Layout::load(&store).await?,
        title: filter.title(),
        products,
        search: filter.search.clone().unwrap_or_default(),
        categories,
        price_ranges,
        brands,
        ratings,
    })
}

/// Display product detail page.
#[instrument(skip(state, store))]
pub async fn show(
    State(state): State<AppState>,
    store: LocalStore,
    Path(id): Path<String>,
    Query(query): Query<ShowQuery>,
) -> Result<impl IntoResponse> {
    let product = find_product(&state, &id)?;
    let notice = query.notice.as_deref().and_then(Notice::parse);
    ProductShowTemplate::build(&store, product, notice).await
}

/// Add a product to the quick cart or a named cart.
#[instrument(skip(state, store))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    store: LocalStore,
    Path(id): Path<String>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = find_product(&state, &id)?;
    let quantity = form.quantity.unwrap_or(1);
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_QUANTITY}"
        )));
    }

    if let Some(name) = non_blank(form.cart) {
        let mut carts: CartCollection = store.load(keys::CARTS).await?;
        carts.add(&name, product, quantity);
        store.save(keys::CARTS, &carts).await?;
    } else {
        let mut cart: Cart = store.load(keys::CART).await?;
        cart.add(product, quantity);
        store.save(keys::CART, &cart).await?;
    }

    let product_id = product.id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", &product_id)]));
    Ok(notice_redirect(product, Notice::AddedToCart))
}

/// Add a product to the quick wishlist or a named wishlist.
#[instrument(skip(state, store))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    store: LocalStore,
    Path(id): Path<String>,
    Form(form): Form<AddToWishlistForm>,
) -> Result<Redirect> {
    let product = find_product(&state, &id)?;

    let added = if let Some(name) = non_blank(form.wishlist) {
        let mut wishlists: WishlistCollection = store.load(keys::WISHLISTS).await?;
        let added = wishlists.add(&name, product);
        store.save(keys::WISHLISTS, &wishlists).await?;
        added
    } else {
        let mut wishlist: Wishlist = store.load(keys::WISHLIST).await?;
        let added = wishlist.add(product);
        store.save(keys::WISHLIST, &wishlist).await?;
        added
    };

    let notice = if added {
        Notice::AddedToWishlist
    } else {
        Notice::AlreadyInWishlist
    };
    Ok(notice_redirect(product, notice))
}

fn notice_redirect(product: &Product, notice: Notice) -> Redirect {
    Redirect::to(&format!("/product/{}?notice={}", product.id, notice.as_str()))
}
