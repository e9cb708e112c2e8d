//! Admin dashboard projections.

use serde::{Deserialize, Serialize};

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_orders: u64,
    pub total_users: u64,
    pub placed_orders: u64,
    pub processing_orders: u64,
    pub shipped_orders: u64,
    pub delivered_orders: u64,
    pub cancelled_orders: u64,
}

impl DashboardStats {
    /// Orders that still need fulfilment work.
    #[must_use]
    pub const fn open_orders(&self) -> u64 {
        self.placed_orders + self.processing_orders + self.shipped_orders
    }
}
