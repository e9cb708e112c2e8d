//! `shopfront auth` - login, registration and profile.

use clap::Subcommand;
use shopfront_client::error::ClientError;
use shopfront_client::state::Shopfront;
use shopfront_core::{LoginRequest, ProfileUpdate, RegisterRequest, User};

use super::require_user;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with username and password
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update profile fields
    Profile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

pub async fn run(shop: &Shopfront, action: AuthAction) -> Result<(), ClientError> {
    let session = shop.session();
    match action {
        AuthAction::Login { username, password } => {
            let user = session.login(&LoginRequest { username, password }).await?;
            println!("Welcome back, {}!", user.display_name());
        }
        AuthAction::Register {
            username,
            password,
            confirm_password,
            email,
            first_name,
            last_name,
            address,
            phone,
        } => {
            let data = RegisterRequest {
                username,
                password,
                email,
                first_name,
                last_name,
                address,
                phone,
            };
            let user = session.register(&data, &confirm_password).await?;
            println!("Account created. Welcome, {}!", user.display_name());
        }
        AuthAction::Logout => {
            session.logout();
            println!("Logged out.");
        }
        AuthAction::Whoami => match session.current_user() {
            Some(user) if session.is_logged_in() => print_user(&user),
            _ => println!("Not logged in."),
        },
        AuthAction::Profile {
            email,
            first_name,
            last_name,
            address,
            phone,
        } => {
            require_user(session)?;
            let update = ProfileUpdate {
                email,
                first_name,
                last_name,
                address,
                phone,
            };
            let user = session.update_profile(&update).await?;
            println!("Profile updated.");
            print_user(&user);
        }
    }
    Ok(())
}

fn print_user(user: &User) {
    println!("{} ({})", user.display_name(), user.username);
    if !user.email.is_empty() {
        println!("  Email:   {}", user.email);
    }
    if !user.address.is_empty() {
        println!("  Address: {}", user.address);
    }
    if !user.phone.is_empty() {
        println!("  Phone:   {}", user.phone);
    }
    if let Some(role) = user.role {
        println!("  Role:    {role}");
    }
}
