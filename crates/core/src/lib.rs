//! Shopfront Core - Domain types and storefront rules.
//!
//! This crate holds the rules for products, carts, wishlists, checkout,
//! orders, payments, bids and profiles. It is shared by:
//! - `storefront` - the web binary that renders pages and owns session state
//! - `integration-tests` - router-level tests against the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! sessions, no HTTP. Callers load a collection, apply an operation here,
//! and persist the result themselves.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and statuses
//! - [`catalog`] - Fixture records and product filtering
//! - [`cart`] - Quick cart and named cart collections
//! - [`wishlist`] - Named wishlist collections
//! - [`checkout`] - Pending checkout of selected carts
//! - [`order`] - Order records produced by checkout and payment
//! - [`payment`] - Simulated payment validation
//! - [`profile`] - The visitor profile and saved addresses
//! - [`bid`] - Auction bids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bid;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod payment;
pub mod profile;
pub mod types;
pub mod wishlist;

pub use types::*;
