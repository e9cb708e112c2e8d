//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers and wire shapes for the storefront
//! domain.

pub mod admin;
pub mod cart;
pub mod id;
pub mod order;
pub mod payment;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use admin::DashboardStats;
pub use cart::CartItem;
pub use id::*;
pub use order::{
    CreateOrderRequest, Order, OrderAddress, OrderItem, OrderLineRequest, OrderTracking,
    ShippingAddress, StatusUpdate,
};
pub use payment::{PaymentInfo, PaymentRequest, PaymentResponse, mask_card_number};
pub use price::Price;
pub use product::Product;
pub use status::*;
pub use user::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User};
