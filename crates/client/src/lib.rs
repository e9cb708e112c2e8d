//! Shopfront storefront client library.
//!
//! Holds the client-side state of a storefront backed by a remote REST API:
//! the cart, the logged-in session, checkout staging, advisory form
//! validation and a typed HTTP client for every backend resource.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod pricing;
pub mod session;
pub mod state;
pub mod storage;
pub mod validation;
