//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::FixtureCatalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything here is read-only after startup;
/// per-visitor data lives in [`crate::storage::LocalStore`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: FixtureCatalog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: FixtureCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the fixture catalog.
    #[must_use]
    pub fn catalog(&self) -> &FixtureCatalog {
        &self.inner.catalog
    }
}
