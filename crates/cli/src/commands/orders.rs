//! `shopfront orders` - order history and actions.

use clap::Subcommand;
use shopfront_client::error::ClientError;
use shopfront_client::orders::{cancel_order, order_history};
use shopfront_client::state::Shopfront;
use shopfront_core::{OrderId, OrderStatus};

use super::{print_order, print_order_line, require_user};

#[derive(Subcommand)]
pub enum OrdersAction {
    /// Your orders, newest first
    List {
        /// Only orders in this status
        #[arg(short, long)]
        status: Option<OrderStatus>,
    },
    /// Order details
    Show { order_id: OrderId },
    /// Cancel an order that has not shipped
    Cancel { order_id: OrderId },
    /// Tracking summary
    Track { order_id: OrderId },
}

pub async fn run(shop: &Shopfront, action: OrdersAction) -> Result<(), ClientError> {
    let user = require_user(shop.session())?;
    let api = shop.api();

    match action {
        OrdersAction::List { status } => {
            let orders = order_history(api.get_orders_by_user(user.user_id).await?, status);
            if orders.is_empty() {
                println!("No orders found.");
            }
            for order in &orders {
                print_order_line(order);
            }
        }
        OrdersAction::Show { order_id } => print_order(&api.get_order(order_id).await?),
        OrdersAction::Cancel { order_id } => {
            let order = cancel_order(api, order_id).await?;
            println!("Order #{} is now {}.", order.order_id, order.status);
        }
        OrdersAction::Track { order_id } => {
            let tracking = api.track_order(order_id).await?;
            println!("Order #{order_id}: {}", tracking.status);
            if let Some(updated) = tracking.last_updated {
                println!("  Last updated:       {}", updated.format("%Y-%m-%d %H:%M"));
            }
            if let Some(eta) = tracking.estimated_delivery {
                println!("  Estimated delivery: {}", eta.format("%Y-%m-%d"));
            }
        }
    }
    Ok(())
}
