//! Checkout: shipping staging, order placement and mock payment.
//!
//! The order is created first and is authoritative from then on; payment is
//! processed against it for the amount the backend computed. The cart and
//! the staged address are cleared only once payment succeeds, so a failed
//! payment can be retried against the same order with
//! [`CheckoutFlow::pay_existing`].

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, instrument, warn};

use shopfront_core::{
    CreateOrderRequest, Order, OrderId, OrderLineRequest, PaymentInfo, PaymentResponse,
    PaymentStatus, ShippingAddress, User,
};

use crate::api::{ApiClient, ApiError};
use crate::cart::CartStore;
use crate::error::add_breadcrumb;
use crate::pricing::PricePreview;
use crate::storage::{KeyValueStore, StorageError, keys, read_json, write_json};
use crate::validation::{ValidationError, validate_payment, validate_shipping};

/// Errors that can stop a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please enter a shipping address first")]
    MissingShipping,

    /// A form failed validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The staging store could not be read or written.
    #[error("Checkout storage error: {0}")]
    Storage(#[from] StorageError),

    /// The backend refused to create the order. Nothing was charged.
    #[error("Failed to place order: {0}")]
    Order(#[source] ApiError),

    /// The order exists but the payment call failed.
    #[error("Payment for order {order_id} failed: {source}")]
    Payment {
        order_id: OrderId,
        #[source]
        source: ApiError,
    },

    /// The order exists but the payment was not completed.
    #[error("Payment for order {order_id} was {status}")]
    Declined {
        order_id: OrderId,
        status: PaymentStatus,
    },
}

impl CheckoutError {
    /// The placed order whose payment is outstanding, if any.
    #[must_use]
    pub const fn unpaid_order(&self) -> Option<OrderId> {
        match self {
            Self::Payment { order_id, .. } | Self::Declined { order_id, .. } => Some(*order_id),
            _ => None,
        }
    }

    /// The message to show a user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Order(err) => err.user_message(),
            Self::Payment { order_id, source } => format!(
                "Order {order_id} was placed but payment failed: {}",
                source.user_message()
            ),
            Self::Declined { order_id, .. } => {
                format!("Order {order_id} was placed but payment was declined")
            }
            _ => self.to_string(),
        }
    }
}

/// A paid order.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub order: Order,
    pub payment: PaymentResponse,
}

/// Drives one checkout over the cart and the staging store.
pub struct CheckoutFlow<'a> {
    api: &'a ApiClient,
    cart: &'a CartStore,
    staging: &'a dyn KeyValueStore,
}

impl<'a> CheckoutFlow<'a> {
    /// Create a checkout over `cart`, staging data in `staging`.
    #[must_use]
    pub fn new(api: &'a ApiClient, cart: &'a CartStore, staging: &'a dyn KeyValueStore) -> Self {
        Self { api, cart, staging }
    }

    /// Validate and stage the shipping address for the payment step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Invalid` with the failing fields, or
    /// `CheckoutError::Storage` if the address cannot be staged.
    #[instrument(skip(self, address))]
    pub fn stage_shipping(&self, address: &ShippingAddress) -> Result<(), CheckoutError> {
        validate_shipping(address).into_result()?;
        write_json(self.staging, keys::SHIPPING_ADDRESS, address)?;
        add_breadcrumb("checkout", "Shipping address staged", None);
        Ok(())
    }

    /// The staged shipping address, if any.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Storage` if the staging entry is unreadable.
    pub fn staged_shipping(&self) -> Result<Option<ShippingAddress>, CheckoutError> {
        Ok(read_json(self.staging, keys::SHIPPING_ADDRESS)?)
    }

    /// Subtotal, tax and total of the current cart.
    #[must_use]
    pub fn preview(&self) -> PricePreview {
        PricePreview::for_items(&self.cart.items())
    }

    /// Place an order for the cart and pay for it.
    ///
    /// `today` bounds the card expiry check.
    ///
    /// # Errors
    ///
    /// Fails before any network call on an empty cart, a missing staged
    /// address or an invalid payment form. `CheckoutError::Order` means no
    /// order exists; `Payment` and `Declined` carry the id of the order that
    /// was placed but not paid. The cart is kept on every error.
    #[instrument(skip(self, payment, user), fields(user_id = %user.user_id))]
    pub async fn place_order(
        &self,
        payment: PaymentInfo,
        user: &User,
        today: NaiveDate,
    ) -> Result<Receipt, CheckoutError> {
        let items = self.cart.items();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let shipping_address = self
            .staged_shipping()?
            .ok_or(CheckoutError::MissingShipping)?;
        validate_payment(&payment, today).into_result()?;

        let request = CreateOrderRequest {
            user_id: user.user_id,
            shipping_address,
            items: items
                .iter()
                .map(|line| OrderLineRequest {
                    product_id: line.product.product_id,
                    quantity: line.quantity,
                })
                .collect(),
        };
        let order = self
            .api
            .create_order(&request)
            .await
            .map_err(CheckoutError::Order)?;
        info!(order_id = %order.order_id, total = %order.total_amount, "Order placed");
        add_breadcrumb(
            "checkout",
            "Order placed",
            Some(&[("order_id", order.order_id.to_string().as_str())]),
        );

        self.pay(order, payment).await
    }

    /// Retry payment for an order that was placed but not paid.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Invalid` for an invalid payment form,
    /// `CheckoutError::Order` if the order cannot be loaded, or a payment
    /// failure carrying `order_id`.
    #[instrument(skip(self, payment), fields(order_id = %order_id))]
    pub async fn pay_existing(
        &self,
        order_id: OrderId,
        payment: PaymentInfo,
        today: NaiveDate,
    ) -> Result<Receipt, CheckoutError> {
        validate_payment(&payment, today).into_result()?;
        let order = self
            .api
            .get_order(order_id)
            .await
            .map_err(CheckoutError::Order)?;
        self.pay(order, payment).await
    }

    async fn pay(&self, order: Order, payment: PaymentInfo) -> Result<Receipt, CheckoutError> {
        let order_id = order.order_id;
        let request = payment.into_request(order_id, order.total_amount);

        let response = self
            .api
            .process_payment(&request)
            .await
            .map_err(|source| CheckoutError::Payment { order_id, source })?;

        if response.status != PaymentStatus::Completed {
            warn!(order_id = %order_id, status = %response.status, "Payment not completed");
            return Err(CheckoutError::Declined {
                order_id,
                status: response.status,
            });
        }

        info!(
            order_id = %order_id,
            transaction_id = %response.transaction_id,
            "Payment completed"
        );
        self.cart.clear_cart();
        if let Err(e) = self.staging.remove(keys::SHIPPING_ADDRESS) {
            warn!(error = %e, "Failed to clear staged shipping address");
        }

        Ok(Receipt {
            order,
            payment: response,
        })
    }
}
