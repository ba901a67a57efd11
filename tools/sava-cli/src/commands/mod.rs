//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod open;
pub mod orders;
pub mod totals;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use sava_commerce::checkout::PaymentMethod;
use sava_store::MemoryStore;
use sava_storefront::{SessionState, Storefront, StorefrontError};

use crate::context::Context;

/// Run `f` against the saved session and save it afterwards.
///
/// The session is saved even when `f` fails so navigation and cart
/// changes made before the failure are kept.
pub fn with_session<T>(
    ctx: &Context,
    f: impl FnOnce(&Storefront<MemoryStore>, &mut SessionState) -> Result<T>,
) -> Result<T> {
    let shop = ctx.storefront()?;
    let mut session = ctx.load_session(&shop)?;
    if let Some(notice) = shop.begin_request(&mut session, Utc::now()) {
        ctx.output.notice(&notice);
    }

    let result = f(&shop, &mut session);
    ctx.save_session(&session)?;
    result
}

/// Turn a storefront error into the message shown to the shopper.
pub fn fail(shop: &Storefront<MemoryStore>, err: StorefrontError) -> anyhow::Error {
    let notice = shop.notice_for(&err);
    match notice.details {
        Some(details) => anyhow!("{} [{}] {}", notice.message, notice.code, details),
        None => anyhow!("{}", notice.message),
    }
}

fn parse_payment(value: &str) -> Result<PaymentMethod, String> {
    PaymentMethod::parse(value).ok_or_else(|| {
        format!("unknown payment method '{value}' (expected card, paypal or cash_on_delivery)")
    })
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Only this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Search name, description and category.
        #[arg(short, long)]
        search: Option<String>,

        /// Page number.
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show one product.
    Show {
        /// Product ID.
        id: String,
    },
    /// List categories.
    Categories,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: String,

        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set a line's quantity (0 removes it).
    Update {
        /// Product ID.
        id: String,
        /// New quantity.
        quantity: i64,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Remove everything.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name (default: account name).
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email (default: account email).
    #[arg(long)]
    pub email: Option<String>,

    /// Street address.
    #[arg(long, default_value = "")]
    pub street: String,

    /// City.
    #[arg(long, default_value = "")]
    pub city: String,

    /// Postal code.
    #[arg(long, default_value = "")]
    pub postal_code: String,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Payment method: card, paypal or cash_on_delivery.
    #[arg(long, default_value = "card", value_parser = parse_payment)]
    pub payment: PaymentMethod,

    /// Show the order review without placing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: Option<AccountCommand>,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Show the signed-in account.
    Show,
    /// Sign in.
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in.
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name.
        #[arg(long)]
        name: String,
    },
    /// Sign out.
    SignOut,
    /// Switch the interface language (ES or EN).
    Lang {
        lang: String,
    },
}

/// Arguments for the totals command.
#[derive(Args)]
pub struct TotalsArgs {
    /// Line as PRICExQUANTITY, e.g. 29.99x2. Repeatable.
    #[arg(short, long = "item")]
    pub items: Vec<String>,

    /// Tax rate as a fraction (default: configured).
    #[arg(long)]
    pub tax_rate: Option<String>,

    /// Flat shipping charge (default: configured).
    #[arg(long)]
    pub shipping: Option<String>,

    /// Free-shipping threshold (default: configured).
    #[arg(long)]
    pub threshold: Option<String>,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Page: home, products, product_detail, cart, checkout, auth, account, orders or about.
    #[arg(default_value = "home")]
    pub page: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and environment.
    Validate,
    /// Show the environment summary.
    Env,
}
