//! Ferme Verte CLI - migrations, seeding, and a shop client.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! fv-cli migrate
//!
//! # Seed the catalog, plans, and demo accounts
//! fv-cli seed
//!
//! # Shop against a running storefront
//! fv-cli shop products
//! fv-cli shop add asperges-vertes-500g --quantity 2
//! fv-cli shop show
//! fv-cli shop checkout --name "Claire Morel" --email claire@example.fr \
//!     --phone 0612345678 --method delivery --line1 "12 rue des Maraîchers" \
//!     --city Blaye --zip 33390
//! ```
//!
//! The shop commands keep a durable local cart (JSON file); `checkout`
//! submits it to `POST /api/orders` and clears the cart only when the
//! server accepts the order.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod cart_file;
mod commands;

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(author, version, about = "Ferme Verte CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with the farm catalog and demo accounts
    Seed,
    /// Shop against a running storefront API
    Shop {
        /// Storefront base URL
        #[arg(long, env = "FV_SHOP_URL", default_value = "http://127.0.0.1:3000")]
        url: String,

        /// Path of the local cart file
        #[arg(long, env = "FV_CART_FILE", default_value = "fv-cart.json")]
        cart: std::path::PathBuf,

        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Shop { url, cart, action } => {
            commands::shop::run(&url, &cart, action).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn shop_args_use_defaults() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["fv-cli", "shop", "show"]).expect("parse");
        match cli.command {
            Commands::Shop { url, cart, .. } => {
                assert_eq!(url, "http://127.0.0.1:3000");
                assert_eq!(cart, std::path::PathBuf::from("fv-cart.json"));
            }
            _ => panic!("expected shop subcommand"),
        }
    }
}
