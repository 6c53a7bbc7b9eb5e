//! Visitor preferences.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::storage::{LocalStore, keys};

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    /// Page to return to.
    pub return_to: Option<String>,
}

/// Only same-site paths are followed.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

/// Flip dark mode and go back to the page the toggle was on.
#[instrument(skip(store))]
pub async fn toggle_dark_mode(store: LocalStore, Form(form): Form<ToggleForm>) -> Result<Redirect> {
    let dark_mode: bool = store.load(keys::DARK_MODE).await?;
    store.save(keys::DARK_MODE, &!dark_mode).await?;
    tracing::debug!(dark_mode = !dark_mode, "Dark mode toggled");
    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
}
