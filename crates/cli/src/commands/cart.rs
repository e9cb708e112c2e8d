//! `shopfront cart` - cart inspection and editing.

use clap::Subcommand;
use shopfront_client::error::ClientError;
use shopfront_client::pricing::PricePreview;
use shopfront_client::state::Shopfront;
use shopfront_core::ProductId;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        product_id: ProductId,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line; zero or less removes it
    Update {
        product_id: ProductId,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { product_id: ProductId },
    /// Add one unit, up to the stock available
    Inc { product_id: ProductId },
    /// Remove one unit, keeping at least one
    Dec { product_id: ProductId },
    /// Empty the cart
    Clear,
}

pub async fn run(shop: &Shopfront, action: CartAction) -> Result<(), ClientError> {
    let cart = shop.cart();
    match action {
        CartAction::Show => {}
        CartAction::Add {
            product_id,
            quantity,
        } => {
            let product = shop.api().get_product(product_id).await?;
            if !product.in_stock() {
                println!("{} is out of stock.", product.name);
                return Ok(());
            }
            println!("Added {quantity} x {} to the cart.", product.name);
            cart.add_to_cart(product, quantity);
        }
        CartAction::Update {
            product_id,
            quantity,
        } => cart.update_quantity(product_id, quantity),
        CartAction::Remove { product_id } => cart.remove_from_cart(product_id),
        CartAction::Inc { product_id } => {
            if !cart.increment(product_id) {
                println!("No more stock available for product {product_id}.");
            }
        }
        CartAction::Dec { product_id } => {
            if !cart.decrement(product_id) {
                println!("Quantity is already at its minimum; use `cart remove` to drop the line.");
            }
        }
        CartAction::Clear => cart.clear_cart(),
    }

    let items = cart.items();
    if items.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }
    for line in &items {
        println!(
            "{:>5}  {:<32} {:>3} x {:>10} = {:>10}",
            line.product.product_id,
            line.product.name,
            line.quantity,
            line.product.price,
            line.subtotal()
        );
    }
    let preview = PricePreview::for_items(&items);
    println!("{} item(s)", cart.item_count());
    println!("Subtotal: {}", preview.subtotal);
    println!("Tax (8%): {}", preview.tax);
    println!("Total:    {}", preview.total);
    Ok(())
}
