//! Integration tests for Shopfront.
//!
//! Tests drive the full storefront router in-process with an in-memory
//! session store and the fixtures in `crates/storefront/data`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut shopper = Shopper::new().await;
//! let resp = shopper.get("/health").await;
//! assert_eq!(resp.status, StatusCode::OK);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use shopfront_storefront::catalog::FixtureCatalog;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::middleware::SESSION_COOKIE_NAME;
use shopfront_storefront::state::AppState;

/// Directory holding the storefront's JSON fixtures.
#[must_use]
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/data")
}

/// Build the storefront router over the fixtures and a fresh memory store.
pub async fn test_app() -> Router {
    let config = StorefrontConfig {
        data_dir: fixture_dir(),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        ..StorefrontConfig::default()
    };
    let catalog = FixtureCatalog::load(&config.data_dir).await;
    shopfront_storefront::app(AppState::new(config, catalog), MemoryStore::default())
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Assert a 303 redirect and return its target.
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        assert_eq!(
            self.status,
            StatusCode::SEE_OTHER,
            "expected redirect, body: {}",
            self.body
        );
        self.location.as_deref().expect("redirect without location")
    }
}

/// One visitor: a router plus the session cookie it was handed.
pub struct Shopper {
    router: Router,
    cookie: Option<String>,
}

impl Shopper {
    pub async fn new() -> Self {
        Self {
            router: test_app().await,
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self
            .request("GET", path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// POST a urlencoded form. Repeated keys are sent in order.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            if let Some(pair) = value.split(';').next()
                && pair.starts_with(SESSION_COOKIE_NAME)
            {
                self.cookie = Some(pair.to_string());
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
