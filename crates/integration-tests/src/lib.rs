//! Integration tests for Shopfront.
//!
//! Each test drives the client library end to end against a `wiremock`
//! backend, with the persistent and staging stores in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - login, cart, checkout and payment
//! - `session_flow` - login failures, logout, restart
//! - `admin_flow` - order status progression

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Value, json};
use shopfront_client::config::ClientConfig;
use shopfront_client::state::Shopfront;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock backend plus a data directory for the client stores.
pub struct TestContext {
    pub server: MockServer,
    pub data_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            data_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Client configuration pointing at the mock backend.
    pub fn config(&self) -> ClientConfig {
        config_for(&self.server, self.data_dir.path())
    }

    /// Open the client stores, as a fresh process would.
    pub fn open(&self) -> Shopfront {
        Shopfront::open(self.config()).unwrap()
    }

    /// Mount the catalog: products 1 to 3.
    pub async fn mount_catalog(&self) {
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                product_json(1, "Wireless Mouse", 29.99, 50),
                product_json(2, "Mechanical Keyboard", 89.99, 25),
                product_json(3, "Laptop Stand", 39.99, 2),
            ])))
            .mount(&self.server)
            .await;
        for (id, name, price, stock) in [
            (1, "Wireless Mouse", 29.99, 50),
            (2, "Mechanical Keyboard", 89.99, 25),
            (3, "Laptop Stand", 39.99, 2),
        ] {
            Mock::given(method("GET"))
                .and(path(format!("/api/products/{id}")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(product_json(id, name, price, stock)),
                )
                .mount(&self.server)
                .await;
        }
    }

    /// Accept `username` / `password123` and reject everything else.
    pub async fn mount_login(&self, username: &str, user_id: i64) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(wiremock::matchers::body_json(
                json!({"username": username, "password": "password123"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": format!("token-{username}"),
                "user": user_json(user_id, username),
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"message": "Invalid username or password"})),
            )
            .mount(&self.server)
            .await;
    }
}

fn config_for(server: &MockServer, data_dir: &Path) -> ClientConfig {
    ClientConfig::for_api_url(&format!("{}/api", server.uri()), data_dir).unwrap()
}

pub fn product_json(id: i64, name: &str, price: f64, stock: u32) -> Value {
    json!({
        "productId": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "stock": stock
    })
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "userId": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "firstName": "Jane",
        "lastName": "Smith",
        "address": "456 Oak Ave",
        "phone": "9876543210",
        "role": if username == "admin" { "ADMIN" } else { "USER" }
    })
}

pub fn order_json(id: i64, status: &str, total: f64) -> Value {
    json!({
        "orderId": id,
        "userId": 2,
        "orderDate": "2025-06-15T09:15:00",
        "status": status,
        "totalAmount": total,
        "items": []
    })
}

/// A fixed date so card expiry checks do not drift.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}
