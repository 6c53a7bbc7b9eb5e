//! Profile route handlers.
//!
//! The profile is seeded from the fixture on first visit and then edited in
//! the visitor's session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::order::Order;
use shopfront_core::profile::{Address, ProfileError};
use shopfront_core::types::AddressId;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::{FALLBACK_IMAGE, Layout};
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    /// Open the details editor.
    pub edit: Option<u8>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct AddressForm {
    pub address: String,
}

fn error_code(error: &ProfileError) -> &'static str {
    match error {
        ProfileError::EmptyName => "name",
        ProfileError::EmptyAddress => "address",
    }
}

fn error_message(code: &str) -> Option<&'static str> {
    match code {
        "name" => Some("Name cannot be empty."),
        "address" => Some("Please enter an address."),
        _ => None,
    }
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/index.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub avatar: String,
    pub addresses: Vec<Address>,
    pub order_count: usize,
    pub editing: bool,
    pub error: Option<&'static str>,
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/settings.html")]
pub struct SettingsTemplate {
    pub layout: Layout,
}

/// Display the profile page.
#[instrument(skip(state, store))]
pub async fn show(
    State(state): State<AppState>,
    store: LocalStore,
    Query(query): Query<ProfileQuery>,
) -> Result<impl IntoResponse> {
    let profile = store.profile(&state.catalog().profile).await?;
    let orders: Vec<Order> = store.load(keys::ORDERS).await?;
    let error = query.error.as_deref().and_then(error_message);

    Ok(ProfileTemplate {
        layout: Layout::load(&store).await?,
        avatar: profile
            .details
            .avatar
            .clone()
            .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
        name: profile.details.name,
        phone: profile.details.phone,
        email: profile.details.email,
        addresses: profile.addresses,
        order_count: orders.len(),
        editing: query.edit.is_some() || query.error.as_deref() == Some("name"),
        error,
    })
}

/// Save name and phone.
#[instrument(skip(state, store))]
pub async fn update_details(
    State(state): State<AppState>,
    store: LocalStore,
    Form(form): Form<DetailsForm>,
) -> Result<Redirect> {
    let mut profile = store.profile(&state.catalog().profile).await?;
    if let Err(e) = profile.update_details(&form.name, &form.phone) {
        return Ok(Redirect::to(&format!("/profile?edit=1&error={}", error_code(&e))));
    }
    store.save(keys::PROFILE, &profile).await?;
    add_breadcrumb("profile", "Updated details", None);
    Ok(Redirect::to("/profile"))
}

/// Add a delivery address.
#[instrument(skip(state, store))]
pub async fn add_address(
    State(state): State<AppState>,
    store: LocalStore,
    Form(form): Form<AddressForm>,
) -> Result<Redirect> {
    let mut profile = store.profile(&state.catalog().profile).await?;
    match profile.add_address(&form.address) {
        Ok(id) => {
            store.save(keys::PROFILE, &profile).await?;
            let id = id.to_string();
            add_breadcrumb("profile", "Added address", Some(&[("address_id", &id)]));
            Ok(Redirect::to("/profile"))
        }
        Err(e) => Ok(Redirect::to(&format!("/profile?error={}", error_code(&e)))),
    }
}

/// Delete a delivery address.
#[instrument(skip(state, store))]
pub async fn delete_address(
    State(state): State<AppState>,
    store: LocalStore,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let mut profile = store.profile(&state.catalog().profile).await?;
    if profile.remove_address(AddressId::new(id)) {
        store.save(keys::PROFILE, &profile).await?;
    }
    Ok(Redirect::to("/profile"))
}

/// Display the settings page.
#[instrument(skip(store))]
pub async fn settings(store: LocalStore) -> Result<impl IntoResponse> {
    Ok(SettingsTemplate {
        layout: Layout::load(&store).await?,
    })
}
