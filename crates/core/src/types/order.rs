//! Order projections and order-creation requests.
//!
//! Orders are read-only views of server state. The client never computes
//! authoritative totals; see `Order::total_amount` for what the server
//! charged.

use core::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderItemId, OrderStatus, Price, ProductId, UserId};

/// Shipping address collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl fmt::Display for ShippingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("{} {}", self.first_name, self.last_name);
        let locality = format!("{}, {} {}", self.city, self.state, self.zip_code);
        let parts = [name.trim(), self.address.trim(), locality.trim()];
        let joined = parts
            .into_iter()
            .filter(|part| !part.is_empty() && *part != ",")
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            f.write_str(NO_ADDRESS)
        } else {
            f.write_str(&joined)
        }
    }
}

const NO_ADDRESS: &str = "No address provided";

/// Shipping address attached to an order.
///
/// Customer order endpoints return the structured address; admin listings
/// return a pre-formatted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderAddress {
    Structured(ShippingAddress),
    Text(String),
}

impl fmt::Display for OrderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(address) => address.fmt(f),
            Self::Text(line) if line.trim().is_empty() => f.write_str(NO_ADDRESS),
            Self::Text(line) => f.write_str(line),
        }
    }
}

/// A line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub quantity: u32,
    pub unit_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Price>,
}

impl OrderItem {
    /// Server subtotal, or unit price times quantity when the server omitted it.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.subtotal
            .unwrap_or_else(|| self.unit_price.times(self.quantity))
    }
}

/// An order as returned by the orders and admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    #[serde(default, alias = "username", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
    pub total_amount: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<OrderAddress>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_date: Option<NaiveDateTime>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Display form of the shipping address.
    #[must_use]
    pub fn shipping_address_line(&self) -> String {
        self.shipping_address
            .as_ref()
            .map_or_else(|| NO_ADDRESS.to_owned(), ToString::to_string)
    }
}

/// One requested line of `POST orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderLineRequest>,
}

/// Body of the status-update endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Response of `GET orders/{id}/track`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTracking {
    pub status: OrderStatus,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
    #[serde(default)]
    pub estimated_delivery: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            address: "456 Oak Ave".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            zip_code: "90001".to_string(),
            country: None,
        }
    }

    #[test]
    fn test_shipping_address_display() {
        assert_eq!(
            address().to_string(),
            "Jane Smith, 456 Oak Ave, Los Angeles, CA 90001"
        );
        assert_eq!(ShippingAddress::default().to_string(), "No address provided");
    }

    #[test]
    fn test_order_accepts_both_address_shapes() {
        let structured = r#"{
            "orderId": 10, "userId": 2, "orderDate": "2025-03-01T09:15:00",
            "status": "PLACED", "totalAmount": 86.39, "taxAmount": 6.40,
            "shippingAddress": {"firstName": "Jane", "lastName": "Smith",
                "email": "jane@example.com", "address": "456 Oak Ave",
                "city": "Los Angeles", "state": "CA", "zipCode": "90001"},
            "items": [{"orderItemId": 1, "productId": 3, "productName": "Laptop Stand",
                "quantity": 2, "unitPrice": 39.99}]
        }"#;
        let order: Order = serde_json::from_str(structured).unwrap();
        assert_eq!(
            order.shipping_address,
            Some(OrderAddress::Structured(address()))
        );
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.items[0].line_total(), Price::from_cents(7998));

        let text = r#"{
            "orderId": 11, "userId": 2, "username": "jane_smith",
            "orderDate": "2025-03-02T10:00:00.123", "status": "SHIPPED",
            "totalAmount": 10, "shippingAddress": "456 Oak Ave, Los Angeles, CA 90001, USA"
        }"#;
        let order: Order = serde_json::from_str(text).unwrap();
        assert_eq!(order.customer_name.as_deref(), Some("jane_smith"));
        assert_eq!(
            order.shipping_address_line(),
            "456 Oak Ave, Los Angeles, CA 90001, USA"
        );
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_create_order_request_shape() {
        let request = CreateOrderRequest {
            user_id: UserId::new(2),
            shipping_address: address(),
            items: vec![OrderLineRequest {
                product_id: ProductId::new(3),
                quantity: 2,
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userId"], 2);
        assert_eq!(json["shippingAddress"]["zipCode"], "90001");
        assert_eq!(json["items"][0]["productId"], 3);
        assert!(json["shippingAddress"].get("phone").is_none());
    }
}
