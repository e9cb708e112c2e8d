//! Order history and order actions.
//!
//! History views sort newest first and optionally filter by status. Actions
//! check the order's current status before calling the backend, which still
//! has the final say.

use thiserror::Error;
use tracing::{info, instrument};

use shopfront_core::{Order, OrderId, OrderStatus};

use crate::api::{ApiClient, ApiError};

/// Errors raised by order actions.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order is delivered or cancelled and cannot move on.
    #[error("Order {order_id} is {status} and cannot be advanced")]
    FinalStatus {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// The order has progressed past the point where it can be cancelled.
    #[error("Order {order_id} is {status} and can no longer be cancelled")]
    NotCancellable {
        order_id: OrderId,
        status: OrderStatus,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl OrderError {
    /// The message to show a user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            _ => self.to_string(),
        }
    }
}

/// Sort `orders` newest first and keep those in `status`, if given.
#[must_use]
pub fn order_history(mut orders: Vec<Order>, status: Option<OrderStatus>) -> Vec<Order> {
    if let Some(status) = status {
        orders.retain(|order| order.status == status);
    }
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    orders
}

/// Cancel a customer order that is still placed or processing.
///
/// # Errors
///
/// Returns `OrderError::NotCancellable` without calling the cancel endpoint
/// if the order has shipped, or any backend failure.
#[instrument(skip(api), fields(order_id = %order_id))]
pub async fn cancel_order(api: &ApiClient, order_id: OrderId) -> Result<Order, OrderError> {
    let order = api.get_order(order_id).await?;
    if !order.status.is_cancellable() {
        return Err(OrderError::NotCancellable {
            order_id,
            status: order.status,
        });
    }
    let order = api.cancel_order(order_id).await?;
    info!(order_id = %order_id, "Order cancelled");
    Ok(order)
}

/// Move an order one step along PLACED, PROCESSING, SHIPPED, DELIVERED.
///
/// # Errors
///
/// Returns `OrderError::FinalStatus` for delivered or cancelled orders, or
/// any backend failure.
#[instrument(skip(api), fields(order_id = %order_id))]
pub async fn advance_order(api: &ApiClient, order_id: OrderId) -> Result<Order, OrderError> {
    let order = api.admin_get_order(order_id).await?;
    let next = order.status.next().ok_or(OrderError::FinalStatus {
        order_id,
        status: order.status,
    })?;
    let order = api.admin_update_order_status(order_id, next).await?;
    info!(order_id = %order_id, status = %order.status, "Order advanced");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;

    fn order(id: i64, date: &str, status: &str) -> Order {
        serde_json::from_value(order_json(id, date, status)).unwrap()
    }

    fn order_json(id: i64, date: &str, status: &str) -> serde_json::Value {
        json!({
            "orderId": id, "userId": 2, "orderDate": date,
            "status": status, "totalAmount": 10.80
        })
    }

    fn api(server: &MockServer) -> ApiClient {
        let config = ClientConfig::for_api_url(&server.uri(), "/tmp/unused").unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_history_is_newest_first() {
        let orders = vec![
            order(1, "2025-01-05T10:00:00", "DELIVERED"),
            order(2, "2025-03-01T09:00:00", "PLACED"),
            order(3, "2025-02-10T12:30:00", "SHIPPED"),
        ];
        let ids: Vec<i64> = order_history(orders, None)
            .iter()
            .map(|o| o.order_id.as_i64())
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_history_status_filter() {
        let orders = vec![
            order(1, "2025-01-05T10:00:00", "PLACED"),
            order(2, "2025-03-01T09:00:00", "SHIPPED"),
            order(3, "2025-02-10T12:30:00", "PLACED"),
        ];
        let placed = order_history(orders, Some(OrderStatus::Placed));
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].order_id, OrderId::new(3));
    }

    #[tokio::test]
    async fn test_advance_moves_one_step() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/orders/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_json(7, "2025-03-01T09:00:00", "PROCESSING")),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/admin/orders/7/status"))
            .and(body_json(json!({"status": "SHIPPED"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_json(7, "2025-03-01T09:00:00", "SHIPPED")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let order = advance_order(&api(&server), OrderId::new(7)).await.unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_advance_refuses_final_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/orders/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_json(7, "2025-03-01T09:00:00", "DELIVERED")),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = advance_order(&api(&server), OrderId::new(7)).await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::FinalStatus {
                status: OrderStatus::Delivered,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cancel_checks_status_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/8"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_json(8, "2025-03-01T09:00:00", "SHIPPED")),
            )
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = cancel_order(&api(&server), OrderId::new(8)).await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Order 8 is SHIPPED and can no longer be cancelled"
        );
    }

    #[tokio::test]
    async fn test_cancel_placed_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_json(9, "2025-03-01T09:00:00", "PLACED")),
            )
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/orders/9/cancel"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_json(9, "2025-03-01T09:00:00", "CANCELLED")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let order = cancel_order(&api(&server), OrderId::new(9)).await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }
}
