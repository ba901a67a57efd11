//! Navigation targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Products,
    ProductDetail,
    Cart,
    Checkout,
    Auth,
    Account,
    Orders,
    About,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Products,
        Page::ProductDetail,
        Page::Cart,
        Page::Checkout,
        Page::Auth,
        Page::Account,
        Page::Orders,
        Page::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Products => "products",
            Page::ProductDetail => "product_detail",
            Page::Cart => "cart",
            Page::Checkout => "checkout",
            Page::Auth => "auth",
            Page::Account => "account",
            Page::Orders => "orders",
            Page::About => "about",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|page| page.as_str() == value)
    }

    /// Pages that redirect to [`Page::Auth`] without a signed-in user.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Checkout | Page::Account | Page::Orders)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
