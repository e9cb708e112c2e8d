//! Backend client tests against a mock server.

use secrecy::SecretString;
use serde_json::json;
use shopfront_client::api::{ApiClient, ApiError};
use shopfront_client::config::ClientConfig;
use shopfront_core::{OrderId, OrderStatus, PaymentId, PaymentStatus, ProductId, UserId};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    let config = ClientConfig::for_api_url(&format!("{}/api", server.uri()), "/tmp/unused")
        .expect("valid base URL");
    ApiClient::new(&config).expect("client builds")
}

fn products_json() -> serde_json::Value {
    json!([
        {"productId": 1, "name": "Wireless Mouse", "description": "Ergonomic", "price": 29.99, "stock": 50},
        {"productId": 2, "name": "Mechanical Keyboard", "description": "RGB", "price": 89.99, "stock": 0}
    ])
}

fn order_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "orderId": id, "userId": 2, "orderDate": "2025-03-01T09:15:00",
        "status": status, "totalAmount": 32.39
    })
}

#[tokio::test]
async fn product_list_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let first = api.get_products().await.unwrap();
    let second = api.get_products().await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn invalidate_cache_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"productId": 1, "name": "Wireless Mouse", "price": 29.99, "stock": 50}
        )))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server);
    api.get_product(ProductId::new(1)).await.unwrap();
    api.get_product(ProductId::new(1)).await.unwrap();
    api.invalidate_cache();
    api.get_product(ProductId::new(1)).await.unwrap();
}

#[tokio::test]
async fn search_sends_query_and_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/search"))
        .and(query_param("q", "wireless mouse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server);
    api.search_products("wireless mouse").await.unwrap();
    let results = api.search_products("wireless mouse").await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn bearer_token_is_attached_once_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/user/2"))
        .and(header("authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_json(10, "PLACED")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/user/2"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;

    let api = client(&server);
    let err = api.get_orders_by_user(UserId::new(2)).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    api.set_token(SecretString::from("jwt-token"));
    let orders = api.get_orders_by_user(UserId::new(2)).await.unwrap();
    assert_eq!(orders[0].order_id, OrderId::new(10));
}

#[tokio::test]
async fn server_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Username already exists"})),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let data = shopfront_core::RegisterRequest {
        username: "john_doe".to_string(),
        password: "Secret1!".to_string(),
        ..Default::default()
    };
    let err = api.register(&data).await.unwrap_err();
    assert!(err.is_server_response());
    assert_eq!(err.user_message(), "Username already exists");
    assert_eq!(err.server_message(), Some("Username already exists"));
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
}

#[tokio::test]
async fn missing_order_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Order not found with id: 99"))
        .mount(&server)
        .await;

    let err = client(&server).get_order(OrderId::new(99)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.user_message(), "Order not found with id: 99");
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn order_status_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/status/SHIPPED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_json(4, "SHIPPED")])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/orders/4/status"))
        .and(body_json(json!({"status": "DELIVERED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(4, "DELIVERED")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/4/track"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "DELIVERED",
            "lastUpdated": "2025-03-05T14:00:00"
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let shipped = api.get_orders_by_status(OrderStatus::Shipped).await.unwrap();
    assert_eq!(shipped.len(), 1);

    let order = api
        .update_order_status(OrderId::new(4), OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);

    let tracking = api.track_order(OrderId::new(4)).await.unwrap();
    assert_eq!(tracking.status, OrderStatus::Delivered);
    assert!(tracking.estimated_delivery.is_none());
}

#[tokio::test]
async fn payment_lookup_and_refund() {
    let server = MockServer::start().await;
    let payment = json!({
        "paymentId": 3, "orderId": 10, "status": "COMPLETED",
        "transactionId": "TXN-9F8E7D6C", "amount": 32.39, "cardLastFour": "1111"
    });
    Mock::given(method("GET"))
        .and(path("/api/payments/order/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/3/refund"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paymentId": 3, "orderId": 10, "status": "REFUNDED",
            "transactionId": "TXN-9F8E7D6C", "amount": 32.39
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let found = api.get_payment_by_order(OrderId::new(10)).await.unwrap();
    assert_eq!(found.payment_id, PaymentId::new(3));
    assert_eq!(found.card_last_four.as_deref(), Some("1111"));

    let refunded = api.refund_payment(PaymentId::new(3)).await.unwrap();
    assert_eq!(refunded.status, PaymentStatus::Refunded);
}

#[tokio::test]
async fn admin_dashboard_and_listings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalOrders": 12, "totalUsers": 4, "placedOrders": 3,
            "processingOrders": 2, "shippedOrders": 1, "deliveredOrders": 5,
            "cancelledOrders": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/status/PLACED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "orderId": 7, "userId": 2, "username": "jane_smith",
            "orderDate": "2025-03-01T09:15:00", "status": "PLACED",
            "totalAmount": 32.39, "shippingAddress": "456 Oak Ave, Los Angeles, CA 90001"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"userId": 1, "username": "admin", "role": "ADMIN"},
            {"userId": 2, "username": "jane_smith", "role": "USER"}
        ])))
        .mount(&server)
        .await;

    let api = client(&server);
    let stats = api.get_dashboard_stats().await.unwrap();
    assert_eq!(stats.total_orders, 12);
    assert_eq!(stats.open_orders(), 6);

    let placed = api
        .admin_get_orders_by_status(OrderStatus::Placed)
        .await
        .unwrap();
    assert_eq!(placed[0].customer_name.as_deref(), Some("jane_smith"));
    assert_eq!(
        placed[0].shipping_address_line(),
        "456 Oak Ave, Los Angeles, CA 90001"
    );

    let users = api.admin_get_users().await.unwrap();
    assert!(users[0].is_admin());
    assert!(!users[1].is_admin());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::for_api_url(&format!("http://127.0.0.1:{port}/api"), "/tmp/unused")
        .expect("valid base URL");
    let api = ApiClient::new(&config).expect("client builds");

    let err = api.get_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert!(!err.is_server_response());
    assert_eq!(err.server_message(), None);
}
