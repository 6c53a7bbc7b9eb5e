//! Shopfront Storefront library.
//!
//! The storefront as a library, so the router can be driven from tests with an
//! in-memory session store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::catalog::files;
use crate::state::AppState;

/// Build the complete application router.
///
/// Sentry layers are added by the binary on top of this.
pub fn app<S>(state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = middleware::create_session_layer(store, state.config());
    let static_dir = state.config().static_dir.clone();
    let data_dir = state.config().data_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service("/data", ServeDir::new(&data_dir))
        .route_service("/ads.json", ServeFile::new(data_dir.join(files::ADS)))
        .route_service(
            "/categories.json",
            ServeFile::new(data_dir.join(files::CATEGORIES)),
        )
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the product catalog has loaded.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().products.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
