//! `admin/*` endpoints.
//!
//! Authorization is enforced by the backend; these calls simply fail with
//! `ApiError::Unauthorized` for non-admin tokens.

use tracing::instrument;

use shopfront_core::{DashboardStats, Order, OrderId, OrderStatus, StatusUpdate, User};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = self.endpoint("admin/dashboard/stats")?;
        self.get(url).await
    }

    /// Every order in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn admin_get_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint("admin/orders")?;
        self.get(url).await
    }

    /// Every order currently in `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(status = %status))]
    pub async fn admin_get_orders_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&format!("admin/orders/status/{status}"))?;
        self.get(url).await
    }

    /// Full detail of any order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_get_order(&self, order_id: OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("admin/orders/{order_id}"))?;
        self.get(url).await
    }

    /// Set the status of any order.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection or any transport/parse error.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn admin_update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("admin/orders/{order_id}/status"))?;
        self.put(url, &StatusUpdate { status }).await
    }

    /// Every registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn admin_get_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint("admin/users")?;
        self.get(url).await
    }
}
