//! Mock payment requests and responses.

use core::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OrderId, PaymentId, PaymentStatus, Price};

/// Card details entered on the payment step, before an order exists.
#[derive(Clone, Default)]
pub struct PaymentInfo {
    pub card_number: String,
    pub card_holder_name: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentInfo {
    /// Build the request for a specific order and amount.
    #[must_use]
    pub fn into_request(self, order_id: OrderId, amount: Price) -> PaymentRequest {
        PaymentRequest {
            order_id,
            card_number: self.card_number.split_whitespace().collect(),
            card_holder_name: self.card_holder_name.trim().to_owned(),
            expiry_date: self.expiry_date,
            cvv: self.cvv,
            amount,
        }
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &mask_card_number(&self.card_number))
            .field("card_holder_name", &self.card_holder_name)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST payments`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub card_number: String,
    pub card_holder_name: String,
    pub expiry_date: String,
    pub cvv: String,
    pub amount: Price,
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("order_id", &self.order_id)
            .field("card_number", &mask_card_number(&self.card_number))
            .field("card_holder_name", &self.card_holder_name)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"[REDACTED]")
            .field("amount", &self.amount)
            .finish()
    }
}

/// A payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: String,
    pub amount: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDateTime>,
}

/// `**** 1234` style mask keeping only the last four digits.
#[must_use]
pub fn mask_card_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
    format!("**** {tail}")
}
