//! `shopfront admin` - dashboard, order management and users.
//!
//! Authorization is enforced by the backend; these commands simply forward
//! the session token.

use clap::Subcommand;
use shopfront_client::error::ClientError;
use shopfront_client::orders::{advance_order, order_history};
use shopfront_client::state::Shopfront;
use shopfront_core::{OrderId, OrderStatus};

use super::{print_order, print_order_line, require_user};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Dashboard statistics
    Stats,
    /// All orders, newest first
    Orders {
        /// Only orders in this status
        #[arg(short, long)]
        status: Option<OrderStatus>,
    },
    /// Order details
    Order { order_id: OrderId },
    /// Move an order to its next status
    Advance { order_id: OrderId },
    /// Set an order's status directly
    SetStatus {
        order_id: OrderId,
        status: OrderStatus,
    },
    /// Registered users
    Users,
}

pub async fn run(shop: &Shopfront, action: AdminAction) -> Result<(), ClientError> {
    require_user(shop.session())?;
    let api = shop.api();

    match action {
        AdminAction::Stats => {
            let stats = api.get_dashboard_stats().await?;
            println!("Orders:     {}", stats.total_orders);
            println!("Users:      {}", stats.total_users);
            println!("Open:       {}", stats.open_orders());
            println!("  Placed:     {}", stats.placed_orders);
            println!("  Processing: {}", stats.processing_orders);
            println!("  Shipped:    {}", stats.shipped_orders);
            println!("Delivered:  {}", stats.delivered_orders);
            println!("Cancelled:  {}", stats.cancelled_orders);
        }
        AdminAction::Orders { status } => {
            let orders = match status {
                Some(status) => api.admin_get_orders_by_status(status).await?,
                None => api.admin_get_orders().await?,
            };
            for order in &order_history(orders, status) {
                print_order_line(order);
            }
        }
        AdminAction::Order { order_id } => print_order(&api.admin_get_order(order_id).await?),
        AdminAction::Advance { order_id } => {
            let order = advance_order(api, order_id).await?;
            println!("Order #{} is now {}.", order.order_id, order.status);
        }
        AdminAction::SetStatus { order_id, status } => {
            let order = api.admin_update_order_status(order_id, status).await?;
            println!("Order #{} is now {}.", order.order_id, order.status);
        }
        AdminAction::Users => {
            for user in api.admin_get_users().await? {
                let role = user.role.unwrap_or_default();
                println!(
                    "{:>5}  {:<20} {:<30} {}",
                    user.user_id, user.username, user.email, role
                );
            }
        }
    }
    Ok(())
}
