//! `orders/*` endpoints.

use serde_json::json;
use tracing::instrument;

use shopfront_core::{
    CreateOrderRequest, Order, OrderId, OrderStatus, OrderTracking, StatusUpdate, UserId,
};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Place an order. The backend prices it and returns it with status
    /// `PLACED`.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection (e.g. insufficient stock) or any
    /// transport/parse error.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, lines = request.items.len()))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        let url = self.endpoint("orders")?;
        self.post(url, request).await
    }

    /// Orders visible to the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint("orders")?;
        self.get(url).await
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("orders/{order_id}"))?;
        self.get(url).await
    }

    /// Orders placed by a specific user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&format!("orders/user/{user_id}"))?;
        self.get(url).await
    }

    /// Orders currently in `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(status = %status))]
    pub async fn get_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&format!("orders/status/{status}"))?;
        self.get(url).await
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection or any transport/parse error.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("orders/{order_id}/status"))?;
        self.patch(url, &StatusUpdate { status }).await
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection (e.g. already shipped) or any
    /// transport/parse error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("orders/{order_id}/cancel"))?;
        self.patch(url, &json!({})).await
    }

    /// Tracking summary for an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn track_order(&self, order_id: OrderId) -> Result<OrderTracking, ApiError> {
        let url = self.endpoint(&format!("orders/{order_id}/track"))?;
        self.get(url).await
    }
}
