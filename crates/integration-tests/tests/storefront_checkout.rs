//! Integration tests for checkout, payment, orders, bids and profile.

use axum::http::StatusCode;
use shopfront_core::payment::SIMULATED_OTP;
use shopfront_integration_tests::{Shopper, TestResponse};

/// A shopper with one pair of earbuds in the quick cart, checked out.
async fn shopper_at_checkout() -> Shopper {
    let mut shopper = Shopper::new().await;
    shopper.post_form("/product/2/cart", &[("quantity", "1")]).await;
    let resp = shopper.post_form("/cart/checkout", &[("quick", "on")]).await;
    assert_eq!(resp.redirect_target(), "/checkout");
    shopper
}

async fn submit_card(shopper: &mut Shopper, number: &str) -> TestResponse {
    shopper
        .post_form(
            "/payment",
            &[
                ("method", "card"),
                ("card_number", number),
                ("expiry", "12/30"),
                ("cvv", "123"),
            ],
        )
        .await
}

async fn order_count(shopper: &mut Shopper) -> usize {
    shopper.get("/orders").await.body.matches("Order #").count()
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_requires_a_non_empty_selection() {
    let mut shopper = Shopper::new().await;
    let resp = shopper.post_form("/cart/checkout", &[]).await;
    assert_eq!(resp.redirect_target(), "/cart?error=nothing-selected");

    shopper.post_form("/cart/create", &[("name", "Empty")]).await;
    let resp = shopper.post_form("/cart/checkout", &[("cart", "Empty")]).await;
    assert_eq!(resp.redirect_target(), "/cart?error=nothing-selected");

    let resp = shopper.get("/checkout").await;
    assert_eq!(resp.redirect_target(), "/cart");
}

#[tokio::test]
async fn test_checkout_page_lists_selected_cart() {
    let mut shopper = shopper_at_checkout().await;
    let resp = shopper.get("/checkout").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Quick Cart"));
    assert!(resp.body.contains("Pulse Wireless Earbuds &times; 1"));
    assert!(resp.body.contains("Grand total: <strong>₹1799.00</strong>"));
    assert!(resp.body.contains("12 MG Road, Bengaluru"));
}

#[tokio::test]
async fn test_place_order_from_two_carts() {
    let mut shopper = Shopper::new().await;
    shopper
        .post_form("/product/1/cart", &[("quantity", "1"), ("cart", "Home")])
        .await;
    shopper
        .post_form("/product/4/cart", &[("quantity", "2"), ("cart", "Office")])
        .await;
    let resp = shopper
        .post_form("/cart/checkout", &[("cart", "Home"), ("cart", "Office")])
        .await;
    assert_eq!(resp.redirect_target(), "/checkout");

    let resp = shopper.post_form("/checkout/place-order", &[]).await;
    assert_eq!(resp.redirect_target(), "/orders");

    let orders = shopper.get("/orders").await;
    assert_eq!(orders.body.matches("Order #").count(), 2);
    assert_eq!(orders.body.matches("Order Placed").count(), 2);
    assert!(orders.body.contains("₹24999.00"));
    assert!(orders.body.contains("₹798.00"));

    let cart = shopper.get("/cart").await;
    assert!(cart.body.contains("No carts created yet."));
    assert_eq!(shopper.get("/checkout").await.redirect_target(), "/cart");
}

#[tokio::test]
async fn test_unselected_carts_survive_place_order() {
    let mut shopper = Shopper::new().await;
    shopper
        .post_form("/product/1/cart", &[("quantity", "1"), ("cart", "Home")])
        .await;
    shopper.post_form("/product/4/cart", &[("quantity", "1")]).await;
    shopper.post_form("/cart/checkout", &[("cart", "Home")]).await;
    shopper.post_form("/checkout/place-order", &[]).await;

    let cart = shopper.get("/cart").await;
    assert!(cart.body.contains("Cotton Crew T-Shirt"));
    assert!(cart.body.contains("No carts created yet."));
}

#[tokio::test]
async fn test_items_added_after_checkout_stay_in_cart() {
    let mut shopper = Shopper::new().await;
    shopper
        .post_form("/product/1/cart", &[("quantity", "1"), ("cart", "Home")])
        .await;
    shopper.post_form("/cart/checkout", &[("cart", "Home")]).await;
    shopper
        .post_form("/product/4/cart", &[("quantity", "1"), ("cart", "Home")])
        .await;

    let resp = shopper.post_form("/checkout/place-order", &[]).await;
    assert_eq!(resp.redirect_target(), "/orders");

    let orders = shopper.get("/orders").await;
    assert_eq!(order_count(&mut shopper).await, 1);
    assert!(orders.body.contains("Aurora X5"));
    assert!(!orders.body.contains("Cotton Crew T-Shirt"));

    let cart = shopper.get("/cart").await;
    assert!(cart.body.contains("Home"));
    assert!(cart.body.contains("Cotton Crew T-Shirt"));
    assert!(!cart.body.contains("Aurora X5"));
}

// ============================================================================
// Payment
// ============================================================================

#[tokio::test]
async fn test_payment_without_checkout_redirects_to_cart() {
    let mut shopper = Shopper::new().await;
    assert_eq!(shopper.get("/payment").await.redirect_target(), "/cart");
}

#[tokio::test]
async fn test_card_with_correct_otp_creates_one_confirmed_order() {
    let mut shopper = shopper_at_checkout().await;

    let resp = submit_card(&mut shopper, "4111 1111 1111 1111").await;
    assert_eq!(resp.redirect_target(), "/payment");
    assert!(shopper.get("/payment").await.body.contains("Enter OTP"));

    let resp = shopper
        .post_form("/payment/otp", &[("otp", SIMULATED_OTP)])
        .await;
    assert_eq!(resp.redirect_target(), "/payment/confirmation");

    let confirmation = shopper.get("/payment/confirmation").await;
    assert!(confirmation.body.contains("Payment Successful!"));
    assert!(confirmation.body.contains("ORD-"));

    let orders = shopper.get("/orders").await;
    assert_eq!(orders.body.matches("Order #").count(), 1);
    assert!(orders.body.contains("Confirmed"));
    assert!(orders.body.contains("₹1799.00"));

    assert!(shopper.get("/cart").await.body.contains("Your cart is empty."));
    assert_eq!(shopper.get("/payment").await.redirect_target(), "/cart");
}

#[tokio::test]
async fn test_wrong_otp_creates_no_order() {
    let mut shopper = shopper_at_checkout().await;
    submit_card(&mut shopper, "4111111111111111").await;

    let resp = shopper.post_form("/payment/otp", &[("otp", "000000")]).await;
    assert_eq!(resp.redirect_target(), "/payment?error=otp");

    let page = shopper.get("/payment?error=otp").await;
    assert!(page.body.contains("Invalid OTP!"));
    assert!(!page.body.contains("Enter OTP"));

    assert_eq!(order_count(&mut shopper).await, 0);
    assert!(shopper.get("/cart").await.body.contains("Pulse Wireless Earbuds"));

    // The dialog is closed, so a late correct OTP does nothing
    let resp = shopper
        .post_form("/payment/otp", &[("otp", SIMULATED_OTP)])
        .await;
    assert_eq!(resp.redirect_target(), "/payment");
    assert_eq!(order_count(&mut shopper).await, 0);
}

#[tokio::test]
async fn test_invalid_card_creates_no_order() {
    let mut shopper = shopper_at_checkout().await;
    let resp = submit_card(&mut shopper, "1234").await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Please fill in valid card details."));
    assert!(!resp.body.contains("Enter OTP"));
    assert_eq!(order_count(&mut shopper).await, 0);
}

#[tokio::test]
async fn test_upi_confirm_completes_payment() {
    let mut shopper = shopper_at_checkout().await;

    let resp = shopper
        .post_form("/payment", &[("method", "upi"), ("upi_id", "shopper")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Please enter a valid UPI ID."));

    let resp = shopper
        .post_form("/payment", &[("method", "upi"), ("upi_id", "shopper@okbank")])
        .await;
    assert_eq!(resp.redirect_target(), "/payment");
    assert!(
        shopper
            .get("/payment")
            .await
            .body
            .contains("Complete payment with UPI")
    );

    let resp = shopper.post_form("/payment/confirm", &[]).await;
    assert_eq!(resp.redirect_target(), "/payment/confirmation");
    assert_eq!(order_count(&mut shopper).await, 1);
}

#[tokio::test]
async fn test_paypal_email_needs_at_and_dot() {
    let mut shopper = shopper_at_checkout().await;
    let resp = shopper
        .post_form(
            "/payment",
            &[("method", "paypal"), ("paypal_email", "shopper@example")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Please enter a valid PayPal email."));

    // Cancelling a pending PayPal payment leaves nothing behind
    shopper
        .post_form(
            "/payment",
            &[("method", "paypal"), ("paypal_email", "shopper@example.com")],
        )
        .await;
    shopper.post_form("/payment/cancel", &[]).await;
    let resp = shopper.post_form("/payment/confirm", &[]).await;
    assert_eq!(resp.redirect_target(), "/payment");
    assert_eq!(order_count(&mut shopper).await, 0);
}

// ============================================================================
// Bids
// ============================================================================

#[tokio::test]
async fn test_bid_at_or_below_price_is_rejected() {
    let mut shopper = Shopper::new().await;
    let resp = shopper
        .post_form("/product/2/bid", &[("amount", "1799")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Bid must be higher than ₹1,799"));

    let resp = shopper
        .post_form("/product/2/bid", &[("amount", "lots")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Please enter a whole-rupee bid amount."));

    let bids = shopper.get("/profile/bids").await;
    assert!(bids.body.contains("Active Bids (2)"));
}

#[tokio::test]
async fn test_placed_bid_leads_active_board() {
    let mut shopper = Shopper::new().await;
    let resp = shopper
        .post_form("/product/2/bid", &[("amount", "2000")])
        .await;
    assert_eq!(resp.redirect_target(), "/profile/bids?placed=1");

    let bids = shopper.get("/profile/bids?placed=1").await;
    assert!(bids.body.contains("Your bid has been placed!"));
    assert!(bids.body.contains("Active Bids (3)"));
    assert!(bids.body.contains("₹2,000"));
    assert!(bids.body.contains("7d 0h 0m"));

    let first = bids.body.find("Pulse Wireless Earbuds").expect("new bid shown");
    let seeded = bids.body.find("Nimbus 14 Laptop").expect("seeded bid shown");
    assert!(first < seeded);
}

#[tokio::test]
async fn test_past_bids_tab() {
    let mut shopper = Shopper::new().await;
    let bids = shopper.get("/profile/bids?tab=past").await;
    assert!(bids.body.contains("Past Bids (2)"));
    assert!(bids.body.contains("Non-Stick Cookware Set"));
    assert!(bids.body.contains("₹1,25,000"));
    assert!(!bids.body.contains("Nimbus 14 Laptop"));
}

// ============================================================================
// Profile & Orders
// ============================================================================

#[tokio::test]
async fn test_profile_is_seeded_and_editable() {
    let mut shopper = Shopper::new().await;
    let profile = shopper.get("/profile").await;
    assert!(profile.body.contains("Priya Sharma"));
    assert!(profile.body.contains("12 MG Road, Bengaluru"));

    let resp = shopper
        .post_form("/profile/details", &[("name", "  "), ("phone", "1")])
        .await;
    assert_eq!(resp.redirect_target(), "/profile?edit=1&error=name");
    assert!(
        shopper
            .get("/profile?edit=1&error=name")
            .await
            .body
            .contains("Name cannot be empty.")
    );

    shopper
        .post_form("/profile/details", &[("name", "Priya S"), ("phone", "+91 90000 00000")])
        .await;
    shopper
        .post_form("/profile/addresses", &[("address", "7 Park Street, Kolkata")])
        .await;

    let profile = shopper.get("/profile").await;
    assert!(profile.body.contains("+91 90000 00000"));
    assert!(profile.body.contains("7 Park Street, Kolkata"));
    assert!(profile.body.contains("/profile/addresses/3/delete"));
}

#[tokio::test]
async fn test_order_address_falls_back_when_profile_has_none() {
    let mut shopper = Shopper::new().await;
    shopper.post_form("/profile/addresses/1/delete", &[]).await;
    shopper.post_form("/profile/addresses/2/delete", &[]).await;
    assert!(shopper.get("/profile").await.body.contains("No addresses saved."));

    shopper.post_form("/product/10/cart", &[("quantity", "1")]).await;
    shopper.post_form("/cart/checkout", &[("quick", "on")]).await;
    shopper.post_form("/checkout/place-order", &[]).await;

    let orders = shopper.get("/orders").await;
    assert!(orders.body.contains("Delivery address: No address on file"));
}

#[tokio::test]
async fn test_profile_subpaths_redirect() {
    let mut shopper = Shopper::new().await;
    assert_eq!(shopper.get("/profile/carts").await.redirect_target(), "/cart");
    assert_eq!(
        shopper.get("/profile/wishlists").await.redirect_target(),
        "/wishlist"
    );
    assert_eq!(shopper.get("/profile/settings").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_simulated_login_and_register_return_home() {
    let mut shopper = Shopper::new().await;
    assert_eq!(shopper.get("/login").await.status, StatusCode::OK);
    let resp = shopper
        .post_form("/login", &[("email", "a@b.com"), ("password", "secret")])
        .await;
    assert_eq!(resp.redirect_target(), "/");

    let resp = shopper
        .post_form(
            "/register",
            &[("name", "A"), ("email", "a@b.com"), ("password", "secret")],
        )
        .await;
    assert_eq!(resp.redirect_target(), "/");
}
