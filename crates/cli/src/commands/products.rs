//! `shopfront products` - catalog browsing.

use clap::Subcommand;
use shopfront_client::catalog::{PriceRange, ProductQuery, SortOrder};
use shopfront_client::error::ClientError;
use shopfront_client::state::Shopfront;
use shopfront_core::ProductId;

use super::print_product_line;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List the catalog
    List {
        /// Match name or description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Price band: all, under25, 25to50, 50to100, over100
        #[arg(long, default_value = "all")]
        price: PriceRange,
        /// Ordering: name, price-low, price-high
        #[arg(long, default_value = "name")]
        sort: SortOrder,
    },
    /// Show one product
    Show { product_id: ProductId },
    /// Search the catalog on the server
    Search { query: String },
}

pub async fn run(shop: &Shopfront, action: ProductsAction) -> Result<(), ClientError> {
    match action {
        ProductsAction::List {
            search,
            price,
            sort,
        } => {
            let products = shop.api().get_products().await?;
            let query = ProductQuery {
                search,
                price_range: price,
                sort,
            };
            let selected = query.apply(&products);
            if selected.is_empty() {
                println!("No products match.");
            }
            for product in &selected {
                print_product_line(product);
            }
        }
        ProductsAction::Show { product_id } => {
            let product = shop.api().get_product(product_id).await?;
            println!("{} (#{})", product.name, product.product_id);
            println!("  Price: {}", product.price);
            println!("  Stock: {}", product.stock);
            if let Some(category) = &product.category {
                println!("  Category: {category}");
            }
            if !product.description.is_empty() {
                println!("  {}", product.description);
            }
            if shop.cart().is_in_cart(product_id) {
                println!("  (in your cart)");
            }
        }
        ProductsAction::Search { query } => {
            let products = shop.api().search_products(&query).await?;
            if products.is_empty() {
                println!("No products found for \"{query}\".");
            }
            for product in &products {
                print_product_line(product);
            }
        }
    }
    Ok(())
}
