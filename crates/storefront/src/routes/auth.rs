//! Login and registration pages.
//!
//! There are no accounts. Both forms render and submit, and submitting
//! returns to the home page without authenticating anyone.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::Layout;
use crate::storage::LocalStore;

/// Submitted credentials. The password field is never read.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
}

/// Display the login page.
#[instrument(skip(store))]
pub async fn login_page(store: LocalStore) -> Result<impl IntoResponse> {
    Ok(LoginTemplate {
        layout: Layout::load(&store).await?,
    })
}

/// Accept the login form.
#[instrument(skip_all)]
pub async fn login(Form(form): Form<CredentialsForm>) -> Redirect {
    add_breadcrumb("auth", "Simulated login", Some(&[("email", &form.email)]));
    Redirect::to("/")
}

/// Display the registration page.
#[instrument(skip(store))]
pub async fn register_page(store: LocalStore) -> Result<impl IntoResponse> {
    Ok(RegisterTemplate {
        layout: Layout::load(&store).await?,
    })
}

/// Accept the registration form.
#[instrument(skip_all)]
pub async fn register(Form(form): Form<CredentialsForm>) -> Redirect {
    tracing::debug!(name = %form.name, "Simulated registration");
    Redirect::to("/")
}
