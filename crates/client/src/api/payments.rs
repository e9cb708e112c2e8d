//! `payments/*` endpoints.

use serde_json::json;
use tracing::instrument;

use shopfront_core::{OrderId, PaymentId, PaymentRequest, PaymentResponse};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Charge an order. On success the backend moves the order to
    /// `PROCESSING`.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection (invalid card, already paid) or any
    /// transport/parse error.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn process_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, ApiError> {
        let url = self.endpoint("payments")?;
        self.post(url, request).await
    }

    /// Get a payment by its ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the payment does not exist.
    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn get_payment(&self, payment_id: PaymentId) -> Result<PaymentResponse, ApiError> {
        let url = self.endpoint(&format!("payments/{payment_id}"))?;
        self.get(url).await
    }

    /// The payment recorded for an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order has no payment.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_payment_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<PaymentResponse, ApiError> {
        let url = self.endpoint(&format!("payments/order/{order_id}"))?;
        self.get(url).await
    }

    /// Refund a completed payment; the backend cancels its order.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection (payment not completed) or any
    /// transport/parse error.
    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn refund_payment(&self, payment_id: PaymentId) -> Result<PaymentResponse, ApiError> {
        let url = self.endpoint(&format!("payments/{payment_id}/refund"))?;
        self.post(url, &json!({})).await
    }
}
