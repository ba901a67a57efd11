//! Sava CLI - Command line storefront for SAVA.
//!
//! Commands:
//! - `sava catalog` - Browse products and categories
//! - `sava cart` - Show and change the cart
//! - `sava checkout` - Place an order for the cart
//! - `sava orders` - Order history
//! - `sava account` - Sign in, sign up, sign out, language
//! - `sava open` - Render any storefront page
//! - `sava totals` - Compute totals for ad-hoc line items
//! - `sava config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod render;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use sava_storefront::{logging, Settings};

use commands::{
    AccountArgs, CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, OpenArgs, OrdersArgs, TotalsArgs,
};

/// Sava CLI - Shop the SAVA storefront from the terminal
#[derive(Parser)]
#[command(name = "sava")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Show and change the shopping cart
    Cart(CartArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Show your order history
    Orders(OrdersArgs),

    /// Manage your account and session
    Account(AccountArgs),

    /// Open a storefront page
    Open(OpenArgs),

    /// Compute totals for ad-hoc line items
    Totals(TotalsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let mut settings = Settings::from_env().context("Failed to load settings")?;
    if cli.verbose {
        settings.log_level = "debug".to_string();
    }
    let log_guard = match logging::init(&settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            output.debug(&format!("Logging not initialised: {e}"));
            None
        }
    };

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, settings, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Orders(args) => commands::orders::run(args, &ctx),
        Commands::Account(args) => commands::account::run(args, &ctx),
        Commands::Open(args) => commands::open::run(args, &ctx),
        Commands::Totals(args) => commands::totals::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}
