//! Shopfront CLI - a terminal front-end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Log in and browse
//! shopfront auth login -u jane_smith -p password123
//! shopfront products list --search mouse --price 25to50 --sort price-low
//!
//! # Fill the cart and check out
//! shopfront cart add 3 --quantity 2
//! shopfront checkout shipping --first-name Jane --last-name Smith ...
//! shopfront checkout pay --card-number "4111 1111 1111 1111" ...
//!
//! # Manage orders as an administrator
//! shopfront admin orders --status placed
//! shopfront admin advance 10
//! ```
//!
//! # Commands
//!
//! - `auth` - Log in, register, log out, show or update the profile
//! - `products` - List, show and search the catalog
//! - `cart` - Show and edit the cart
//! - `checkout` - Stage shipping, preview totals, place and pay for the order
//! - `orders` - Order history, details, tracking and cancellation
//! - `payments` - Look up and refund payments
//! - `admin` - Dashboard statistics, order management and users

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_client::config::ClientConfig;
use shopfront_client::error::ClientError;
use shopfront_client::state::Shopfront;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Storefront client for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register and manage the profile
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Shipping, preview and payment
    Checkout {
        #[command(subcommand)]
        action: commands::checkout::CheckoutAction,
    },
    /// Your orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Payment records
    Payments {
        #[command(subcommand)]
        action: commands::payments::PaymentsAction,
    },
    /// Store administration
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_client=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        e.report();
        eprintln!("Error: {}", e.user_message());
        if let Some(errors) = e.field_errors() {
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field, error.message);
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), ClientError> {
    let shop = Shopfront::open(config)?;

    match cli.command {
        Commands::Auth { action } => commands::auth::run(&shop, action).await,
        Commands::Products { action } => commands::products::run(&shop, action).await,
        Commands::Cart { action } => commands::cart::run(&shop, action).await,
        Commands::Checkout { action } => commands::checkout::run(&shop, action).await,
        Commands::Orders { action } => commands::orders::run(&shop, action).await,
        Commands::Payments { action } => commands::payments::run(&shop, action).await,
        Commands::Admin { action } => commands::admin::run(&shop, action).await,
    }
}
