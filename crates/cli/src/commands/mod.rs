//! Subcommand implementations and shared output helpers.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod products;

use shopfront_client::error::ClientError;
use shopfront_client::session::SessionStore;
use shopfront_core::{Order, PaymentResponse, Product, User};

/// The logged-in user, or `ClientError::NotLoggedIn`.
pub fn require_user(session: &SessionStore) -> Result<User, ClientError> {
    match session.current_user() {
        Some(user) if session.is_logged_in() => Ok(user),
        _ => Err(ClientError::NotLoggedIn),
    }
}

pub fn print_product_line(product: &Product) {
    let stock = if product.in_stock() {
        format!("{} in stock", product.stock)
    } else {
        "out of stock".to_string()
    };
    println!(
        "{:>5}  {:<32} {:>10}  {}",
        product.product_id, product.name, product.price, stock
    );
}

pub fn print_order_line(order: &Order) {
    println!(
        "#{:<6} {}  {:<10} {:>10}  {} item(s)",
        order.order_id,
        order.order_date.format("%Y-%m-%d %H:%M"),
        order.status,
        order.total_amount,
        order.item_count()
    );
}

pub fn print_order(order: &Order) {
    println!("Order #{}", order.order_id);
    println!("  Placed:   {}", order.order_date.format("%Y-%m-%d %H:%M"));
    if let Some(customer) = &order.customer_name {
        println!("  Customer: {customer}");
    }
    println!("  Status:   {}", order.status);
    println!("  Ship to:  {}", order.shipping_address_line());
    if let Some(shipped) = order.shipped_date {
        println!("  Shipped:  {}", shipped.format("%Y-%m-%d"));
    }
    if let Some(delivered) = order.delivered_date {
        println!("  Delivered: {}", delivered.format("%Y-%m-%d"));
    }
    for item in &order.items {
        println!(
            "    {:>3} x {:<30} {:>10}",
            item.quantity,
            item.product_name,
            item.line_total()
        );
    }
    if let Some(tax) = order.tax_amount {
        println!("  Tax:      {tax}");
    }
    println!("  Total:    {}", order.total_amount);
}

pub fn print_payment(payment: &PaymentResponse) {
    println!("Payment #{} for order #{}", payment.payment_id, payment.order_id);
    println!("  Status:      {}", payment.status);
    println!("  Amount:      {}", payment.amount);
    if !payment.transaction_id.is_empty() {
        println!("  Transaction: {}", payment.transaction_id);
    }
    if let Some(last_four) = &payment.card_last_four {
        println!("  Card:        **** {last_four}");
    }
    if let Some(date) = payment.payment_date {
        println!("  Date:        {}", date.format("%Y-%m-%d %H:%M"));
    }
}
