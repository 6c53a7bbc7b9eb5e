//! Fixture catalog loaded from the data directory at startup.
//!
//! A missing or malformed fixture leaves that part of the catalog empty; the
//! rest of the storefront keeps working.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use shopfront_core::bid::BidBoard;
use shopfront_core::catalog::{Ad, Category, Product, SearchSuggestions, Seller};
use shopfront_core::profile::Profile;
use shopfront_core::types::ProductId;

/// Fixture file names, relative to the data directory.
pub mod files {
    pub const ADS: &str = "ads.json";
    pub const CATEGORIES: &str = "categories.json";
    pub const PRODUCTS: &str = "products.json";
    pub const SEARCH: &str = "search.json";
    pub const BIDS: &str = "bids.json";
    pub const SELLERS: &str = "sellers.json";
    pub const PROFILE: &str = "profile.json";
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only fixture data.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub ads: Vec<Ad>,
    pub suggestions: SearchSuggestions,
    pub bids: BidBoard,
    pub sellers: Vec<Seller>,
    /// Seed for each visitor's profile.
    pub profile: Profile,
}

impl FixtureCatalog {
    /// Load every fixture under `data_dir`.
    pub async fn load(data_dir: &Path) -> Self {
        let profile = load_or_default(data_dir, files::PROFILE).await;
        let profile = if profile == Profile::default() {
            Profile::guest()
        } else {
            profile
        };

        let catalog = Self {
            products: load_or_default(data_dir, files::PRODUCTS).await,
            categories: load_or_default(data_dir, files::CATEGORIES).await,
            ads: load_or_default(data_dir, files::ADS).await,
            suggestions: load_or_default(data_dir, files::SEARCH).await,
            bids: load_or_default(data_dir, files::BIDS).await,
            sellers: load_or_default(data_dir, files::SELLERS).await,
            profile,
        };

        tracing::info!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            ads = catalog.ads.len(),
            bids = catalog.bids.len(),
            sellers = catalog.sellers.len(),
            "Fixture catalog loaded"
        );
        catalog
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Highest-rated products, best first, ties kept in fixture order.
    #[must_use]
    pub fn top_rated(&self, limit: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        products.truncate(limit);
        products
    }

    /// Distinct brands in fixture order, for the brand filter.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        for product in &self.products {
            if !brands.contains(&product.brand.as_str()) {
                brands.push(&product.brand);
            }
        }
        brands
    }
}

/// Read and parse one fixture.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or is not valid JSON for
/// `T`.
pub async fn load_fixture<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

async fn load_or_default<T: DeserializeOwned + Default>(data_dir: &Path, file: &str) -> T {
    match load_fixture(&data_dir.join(file)).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Fixture unavailable, using empty data");
            T::default()
        }
    }
}
