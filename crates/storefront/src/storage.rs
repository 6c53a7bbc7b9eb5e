//! Per-visitor key/value storage backed by the session.
//!
//! Every visitor gets the same keys a browser's local storage would hold.
//! Values are JSON. Reads never fail on bad data: a missing or undecodable
//! value comes back as the type's default, and the decode failure is logged.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tower_sessions::Session;

use shopfront_core::profile::Profile;

use crate::error::AppError;

/// Storage keys.
pub mod keys {
    /// `bool`: dark theme preference.
    pub const DARK_MODE: &str = "darkMode";
    /// `Cart`: the quick cart fed from product pages.
    pub const CART: &str = "cart";
    /// `CartCollection`: named carts.
    pub const CARTS: &str = "carts";
    /// `Wishlist`: the quick wishlist.
    pub const WISHLIST: &str = "wishlist";
    /// `WishlistCollection`: named wishlists.
    pub const WISHLISTS: &str = "wishlists";
    /// `Vec<Order>`: placed orders, oldest first.
    pub const ORDERS: &str = "orders";
    /// `Profile`: seeded from the profile fixture on first read.
    pub const PROFILE: &str = "profile";
    /// `Vec<Bid>`: bids the visitor placed, newest first.
    pub const BIDS: &str = "bids";
    /// `Checkout`: carts selected for checkout.
    pub const CHECKOUT: &str = "checkout";
    /// `PaymentMethod`: validated payment awaiting OTP or confirmation.
    pub const PAYMENT: &str = "payment";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session layer is not installed")]
    SessionMissing,
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Extractor for the visitor's storage.
#[derive(Clone)]
pub struct LocalStore {
    session: Session,
}

impl<S> FromRequestParts<S> for LocalStore
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(StorageError::SessionMissing)?;
        Ok(Self::new(session))
    }
}

impl LocalStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Read a value, defaulting when absent or malformed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session store itself fails.
    pub async fn load<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = self.session.get_value(key).await? else {
            return Ok(T::default());
        };
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Discarding malformed stored value");
            T::default()
        }))
    }

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or the session store
    /// fails.
    pub async fn save<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        self.session.insert(key, value).await?;
        Ok(())
    }

    /// Delete a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.session.remove_value(key).await?;
        Ok(())
    }

    /// The visitor profile, seeding it from `seed` on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn profile(&self, seed: &Profile) -> Result<Profile, StorageError> {
        if let Some(value) = self.session.get_value(keys::PROFILE).await? {
            match serde_json::from_value(value) {
                Ok(profile) => return Ok(profile),
                Err(e) => tracing::warn!(error = %e, "Stored profile is malformed, reseeding"),
            }
        }
        self.save(keys::PROFILE, seed).await?;
        Ok(seed.clone())
    }
}
