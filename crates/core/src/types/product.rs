//! Catalog product as served by the products endpoint.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
///
/// The cart persists full product snapshots, so this type round-trips
/// through local storage as well as the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Units available. The backend is authoritative; the client only uses
    /// this to bound quantity increments.
    #[serde(default)]
    pub stock: u32,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
