//! `shopfront checkout` - shipping staging, preview and payment.

use clap::{Args, Subcommand};
use shopfront_client::error::ClientError;
use shopfront_client::state::Shopfront;
use shopfront_client::validation::{format_cvv, format_expiry_date};
use shopfront_core::{OrderId, PaymentInfo, ShippingAddress};

use super::{print_order, print_payment, require_user};

#[derive(Subcommand)]
pub enum CheckoutAction {
    /// Validate and save the shipping address
    Shipping(ShippingArgs),
    /// Show the staged address and the price preview
    Preview,
    /// Place the order for the cart and pay for it
    Pay(CardArgs),
    /// Retry payment for an order that was placed but not paid
    RetryPay {
        order_id: OrderId,
        #[command(flatten)]
        card: CardArgs,
    },
}

#[derive(Args)]
pub struct ShippingArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    /// Street address
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long)]
    country: Option<String>,
}

#[derive(Args)]
pub struct CardArgs {
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    card_holder_name: String,
    /// MM/YY
    #[arg(long)]
    expiry_date: String,
    #[arg(long)]
    cvv: String,
}

/// Card number stays raw so validation sees exactly what was typed.
impl From<CardArgs> for PaymentInfo {
    fn from(args: CardArgs) -> Self {
        Self {
            card_number: args.card_number,
            card_holder_name: args.card_holder_name,
            expiry_date: format_expiry_date(&args.expiry_date),
            cvv: format_cvv(&args.cvv),
        }
    }
}

pub async fn run(shop: &Shopfront, action: CheckoutAction) -> Result<(), ClientError> {
    let checkout = shop.checkout();
    let today = chrono::Local::now().date_naive();

    match action {
        CheckoutAction::Shipping(args) => {
            let address = ShippingAddress {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                phone: args.phone,
                address: args.address,
                city: args.city,
                state: args.state,
                zip_code: args.zip_code,
                country: args.country,
            };
            checkout.stage_shipping(&address)?;
            println!("Shipping to: {address}");
        }
        CheckoutAction::Preview => {
            match checkout.staged_shipping()? {
                Some(address) => println!("Shipping to: {address}"),
                None => println!("No shipping address yet; run `checkout shipping`."),
            }
            let preview = checkout.preview();
            println!("Subtotal: {}", preview.subtotal);
            println!("Tax (8%): {}", preview.tax);
            println!("Total:    {}", preview.total);
        }
        CheckoutAction::Pay(card) => {
            let user = require_user(shop.session())?;
            let receipt = checkout.place_order(card.into(), &user, today).await?;
            println!("Thank you! Your order has been placed.");
            print_order(&receipt.order);
            print_payment(&receipt.payment);
        }
        CheckoutAction::RetryPay { order_id, card } => {
            require_user(shop.session())?;
            let receipt = checkout.pay_existing(order_id, card.into(), today).await?;
            println!("Payment received.");
            print_payment(&receipt.payment);
        }
    }
    Ok(())
}
