//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use shopfront_core::catalog::Ad;

use crate::error::Result;
use crate::filters;
use crate::routes::{FALLBACK_IMAGE, Layout, ProductCard};
use crate::state::AppState;
use crate::storage::LocalStore;

/// Number of products in the "Top Rated" strip.
const TOP_RATED_LIMIT: usize = 8;

/// A slide in the hero carousel.
#[derive(Clone)]
pub struct AdSlide {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub link: String,
    /// Only the first slide starts visible.
    pub active: bool,
}

impl AdSlide {
    fn new(ad: &Ad, index: usize) -> Self {
        Self {
            title: ad.title.clone(),
            subtitle: ad.subtitle.clone().unwrap_or_default(),
            image: ad.image.clone(),
            link: ad.link.clone().unwrap_or_else(|| "/products".to_string()),
            active: index == 0,
        }
    }
}

/// A category tile.
#[derive(Clone)]
pub struct CategoryTile {
    pub name: String,
    pub image: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub slides: Vec<AdSlide>,
    pub categories: Vec<CategoryTile>,
    pub top_rated: Vec<ProductCard>,
}

/// Display the home page.
#[instrument(skip(state, store))]
pub async fn home(State(state): State<AppState>, store: LocalStore) -> Result<impl IntoResponse> {
    let catalog = state.catalog();

    let slides = catalog
        .ads
        .iter()
        .enumerate()
        .map(|(index, ad)| AdSlide::new(ad, index))
        .collect();

    let categories = catalog
        .categories
        .iter()
        .map(|category| CategoryTile {
            name: category.name.clone(),
            image: category
                .image
                .clone()
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
        })
        .collect();

    let top_rated = catalog
        .top_rated(TOP_RATED_LIMIT)
        .into_iter()
        .map(ProductCard::from)
        .collect();

    Ok(HomeTemplate {
        layout: Layout::load(&store).await?,
        slides,
        categories,
        top_rated,
    })
}
