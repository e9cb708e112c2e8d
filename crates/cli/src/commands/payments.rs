//! `shopfront payments` - payment lookup and refunds.

use clap::Subcommand;
use shopfront_client::error::ClientError;
use shopfront_client::state::Shopfront;
use shopfront_core::{OrderId, PaymentId};

use super::{print_payment, require_user};

#[derive(Subcommand)]
pub enum PaymentsAction {
    /// Show a payment by id
    Show { payment_id: PaymentId },
    /// Show the payment of an order
    ForOrder { order_id: OrderId },
    /// Refund a completed payment
    Refund { payment_id: PaymentId },
}

pub async fn run(shop: &Shopfront, action: PaymentsAction) -> Result<(), ClientError> {
    require_user(shop.session())?;
    let api = shop.api();

    let payment = match action {
        PaymentsAction::Show { payment_id } => api.get_payment(payment_id).await?,
        PaymentsAction::ForOrder { order_id } => api.get_payment_by_order(order_id).await?,
        PaymentsAction::Refund { payment_id } => {
            let payment = api.refund_payment(payment_id).await?;
            println!("Refund processed.");
            payment
        }
    };
    print_payment(&payment);
    Ok(())
}
