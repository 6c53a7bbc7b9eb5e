//! Simulated payment gateway.
//!
//! # Flow
//!
//! ```text
//! GET  /payment          form for the pending checkout
//! POST /payment          valid details -> pending payment, dialog opens
//! POST /payment/otp      card: "123456" completes, anything else cancels
//! POST /payment/confirm  UPI/PayPal: "Done" completes
//! GET  /payment/confirmation
//! ```
//!
//! Completing creates exactly one "Confirmed" order for the whole checkout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::cart::{Cart, CartCollection};
use shopfront_core::checkout::Checkout;
use shopfront_core::order::Order;
use shopfront_core::payment::{PaymentDetails, PaymentError, PaymentMethod, verify_otp};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::{CartLineView, Layout, format_price};
use crate::state::AppState;
use crate::storage::{LocalStore, keys};

// =============================================================================
// View Types
// =============================================================================

/// A radio button in the method picker.
#[derive(Clone)]
pub struct MethodOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Which dialog is open over the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Otp,
    Confirm,
}

/// Payment form data.
///
/// Every method's fields are posted; only the chosen method's are read.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentForm {
    pub method: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub upi_id: String,
    #[serde(default)]
    pub paypal_email: String,
}

impl PaymentForm {
    /// Details for the chosen method.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::UnknownMethod`] for an unrecognized method.
    pub fn details(&self) -> std::result::Result<PaymentDetails, PaymentError> {
        Ok(match self.method.parse::<PaymentMethod>()? {
            PaymentMethod::Card => PaymentDetails::Card {
                number: self.card_number.clone(),
                expiry: self.expiry.clone(),
                cvv: self.cvv.clone(),
            },
            PaymentMethod::Upi => PaymentDetails::Upi {
                id: self.upi_id.trim().to_string(),
            },
            PaymentMethod::Paypal => PaymentDetails::Paypal {
                email: self.paypal_email.trim().to_string(),
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OtpForm {
    pub otp: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentQuery {
    pub method: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Payment page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/show.html")]
pub struct PaymentTemplate {
    pub layout: Layout,
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total: String,
    pub methods: Vec<MethodOption>,
    pub method: &'static str,
    pub card_number: String,
    pub expiry: String,
    pub upi_id: String,
    pub paypal_email: String,
    pub error: Option<String>,
    pub dialog: Option<Dialog>,
    pub dialog_method: &'static str,
}

impl PaymentTemplate {
    async fn build(
        store: &LocalStore,
        checkout: &Checkout,
        method: PaymentMethod,
        dialog: Option<Dialog>,
    ) -> Result<Self> {
        Ok(Self {
            layout: Layout::load(store).await?,
            lines: checkout
                .carts()
                .iter()
                .flat_map(|cart| cart.items.iter().map(CartLineView::from))
                .collect(),
            item_count: checkout.item_count(),
            total: format_price(checkout.grand_total()),
            methods: PaymentMethod::all()
                .into_iter()
                .map(|m| MethodOption {
                    value: m.as_str(),
                    label: m.label(),
                    selected: m == method,
                })
                .collect(),
            method: method.as_str(),
            card_number: String::new(),
            expiry: String::new(),
            upi_id: String::new(),
            paypal_email: String::new(),
            error: None,
            dialog,
            dialog_method: method.label(),
        })
    }

    #[must_use]
    pub fn otp_open(&self) -> bool {
        self.dialog == Some(Dialog::Otp)
    }

    #[must_use]
    pub fn confirm_open(&self) -> bool {
        self.dialog == Some(Dialog::Confirm)
    }
}

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/confirmation.html")]
pub struct ConfirmationTemplate {
    pub layout: Layout,
    pub order_id: Option<String>,
    pub status: String,
    pub total: String,
    pub item_count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the payment form, with the OTP or confirm dialog if a payment is
/// pending.
#[instrument(skip(store))]
pub async fn show(store: LocalStore, Query(query): Query<PaymentQuery>) -> Result<Response> {
    let checkout: Checkout = store.load(keys::CHECKOUT).await?;
    if checkout.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }
    let pending: Option<PaymentMethod> = store.load(keys::PAYMENT).await?;

    let method = pending
        .or_else(|| query.method.as_deref().and_then(|m| m.parse().ok()))
        .unwrap_or_default();
    let dialog = pending.map(|m| if m.requires_otp() { Dialog::Otp } else { Dialog::Confirm });

    let mut page = PaymentTemplate::build(&store, &checkout, method, dialog).await?;
    if query.error.as_deref() == Some("otp") {
        page.error = Some(PaymentError::InvalidOtp.to_string());
    }
    Ok(page.into_response())
}

/// Validate the payment details and open the matching dialog.
#[instrument(skip(store, form))]
pub async fn submit(store: LocalStore, Form(form): Form<PaymentForm>) -> Result<Response> {
    let checkout: Checkout = store.load(keys::CHECKOUT).await?;
    if checkout.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    match form.details().and_then(|details| details.validate()) {
        Ok(method) => {
            store.save(keys::PAYMENT, &Some(method)).await?;
            add_breadcrumb("payment", "Payment details accepted", Some(&[("method", method.as_str())]));
            Ok(Redirect::to("/payment").into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Payment details rejected");
            let method = form.method.parse().unwrap_or_default();
            let mut page = PaymentTemplate::build(&store, &checkout, method, None).await?;
            page.card_number = form.card_number;
            page.expiry = form.expiry;
            page.upi_id = form.upi_id;
            page.paypal_email = form.paypal_email;
            page.error = Some(e.to_string());
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// Check the card OTP.
///
/// A wrong code closes the dialog; the shopper has to submit the card again.
#[instrument(skip(state, store, form))]
pub async fn submit_otp(
    State(state): State<AppState>,
    store: LocalStore,
    Form(form): Form<OtpForm>,
) -> Result<Redirect> {
    let pending: Option<PaymentMethod> = store.load(keys::PAYMENT).await?;
    if pending != Some(PaymentMethod::Card) {
        return Ok(Redirect::to("/payment"));
    }

    if let Err(e) = verify_otp(&form.otp) {
        tracing::info!(error = %e, "OTP rejected");
        store.clear(keys::PAYMENT).await?;
        return Ok(Redirect::to("/payment?error=otp"));
    }
    complete(&state, &store).await
}

/// Confirm a UPI or PayPal payment.
#[instrument(skip(state, store))]
pub async fn confirm(State(state): State<AppState>, store: LocalStore) -> Result<Redirect> {
    let pending: Option<PaymentMethod> = store.load(keys::PAYMENT).await?;
    match pending {
        Some(method) if !method.requires_otp() => complete(&state, &store).await,
        _ => Ok(Redirect::to("/payment")),
    }
}

/// Close the dialog without paying.
#[instrument(skip(store))]
pub async fn cancel(store: LocalStore) -> Result<Redirect> {
    store.clear(keys::PAYMENT).await?;
    Ok(Redirect::to("/payment"))
}

/// Show the most recent order.
#[instrument(skip(store))]
pub async fn confirmation(store: LocalStore) -> Result<impl IntoResponse> {
    let orders: Vec<Order> = store.load(keys::ORDERS).await?;
    let latest = orders.last();
    Ok(ConfirmationTemplate {
        layout: Layout::load(&store).await?,
        order_id: latest.map(|o| o.id.clone()),
        status: latest.map(|o| o.status.to_string()).unwrap_or_default(),
        total: latest.map(|o| format_price(o.total)).unwrap_or_default(),
        item_count: latest.map_or(0, Order::item_count),
    })
}

/// Record the paid order and clear the checkout.
async fn complete(state: &AppState, store: &LocalStore) -> Result<Redirect> {
    let checkout: Checkout = store.load(keys::CHECKOUT).await?;
    if checkout.is_empty() {
        store.clear(keys::PAYMENT).await?;
        return Ok(Redirect::to("/cart"));
    }
    let profile = store.profile(&state.catalog().profile).await?;

    let order = checkout.payment_order(Utc::now(), profile.primary_address());
    let order_id = order.id.clone();
    let mut orders: Vec<Order> = store.load(keys::ORDERS).await?;
    orders.push(order);
    store.save(keys::ORDERS, &orders).await?;

    let mut cart: Cart = store.load(keys::CART).await?;
    let mut carts: CartCollection = store.load(keys::CARTS).await?;
    checkout.clear_sources(&mut cart, &mut carts);
    store.save(keys::CART, &cart).await?;
    store.save(keys::CARTS, &carts).await?;
    store.clear(keys::CHECKOUT).await?;
    store.clear(keys::PAYMENT).await?;

    add_breadcrumb("payment", "Payment confirmed", Some(&[("order_id", &order_id)]));
    tracing::info!(order_id = %order_id, "Payment confirmed");

    Ok(Redirect::to("/payment/confirmation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_details_reads_chosen_method() {
        let form = PaymentForm {
            method: "upi".to_string(),
            upi_id: " shopper@bank ".to_string(),
            card_number: "ignored".to_string(),
            ..PaymentForm::default()
        };
        assert_eq!(
            form.details(),
            Ok(PaymentDetails::Upi {
                id: "shopper@bank".to_string()
            })
        );
    }

    #[test]
    fn test_form_details_unknown_method() {
        let form = PaymentForm {
            method: "cash".to_string(),
            ..PaymentForm::default()
        };
        assert_eq!(
            form.details(),
            Err(PaymentError::UnknownMethod("cash".to_string()))
        );
    }
}
