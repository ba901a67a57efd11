//! Per-visitor session state.
//!
//! Handlers take the session explicitly; nothing is stored globally.

use crate::i18n::Lang;
use crate::page::Page;
use chrono::{DateTime, Utc};
use sava_auth::UserProfile;
use sava_commerce::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which form the auth page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Progress through checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Review,
    Complete,
}

/// Everything remembered about one visitor between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub page: Page,
    pub user: Option<UserProfile>,
    /// Sum of quantities in the active cart.
    pub cart_count: i64,
    pub search_query: String,
    pub selected_category: Option<String>,
    pub selected_product_id: Option<ProductId>,
    pub lang: Lang,
    pub auth_tab: AuthTab,
    pub checkout_step: CheckoutStep,
    /// Page to continue to after signing in.
    #[serde(default)]
    pub return_to: Option<Page>,
    /// Cart kept while nobody is signed in.
    pub guest_cart: Cart,
    pub last_activity: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

impl SessionState {
    pub fn new(currency: Currency) -> Self {
        Self {
            page: Page::Home,
            user: None,
            cart_count: 0,
            search_query: String::new(),
            selected_category: None,
            selected_product_id: None,
            lang: Lang::default(),
            auth_tab: AuthTab::default(),
            checkout_step: CheckoutStep::default(),
            return_to: None,
            guest_cart: Cart::new(currency),
            last_activity: Utc::now(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.uid.clone())
    }

    /// Move to `page`, returning the page actually shown.
    ///
    /// Pages that need a user send anonymous visitors to the login form
    /// and remember where they were going.
    pub fn navigate_to(&mut self, page: Page) -> Page {
        let target = if page.requires_auth() && !self.is_signed_in() {
            self.return_to = Some(page);
            self.auth_tab = AuthTab::Login;
            Page::Auth
        } else {
            page
        };
        if target == Page::Checkout && self.page != Page::Checkout {
            self.checkout_step = CheckoutStep::Shipping;
        }
        self.page = target;
        target
    }

    /// Open the product listing for a search.
    pub fn search(&mut self, query: impl Into<String>) {
        self.search_query = query.into().trim().to_string();
        self.navigate_to(Page::Products);
    }

    /// Open the product listing for a category, `None` for all.
    pub fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category.filter(|c| !c.trim().is_empty());
        self.navigate_to(Page::Products);
    }

    pub fn view_product(&mut self, product_id: ProductId) {
        self.selected_product_id = Some(product_id);
        self.navigate_to(Page::ProductDetail);
    }

    /// Record the signed-in user and continue to the remembered page.
    pub fn sign_in(&mut self, user: UserProfile) -> Page {
        self.user = Some(user);
        let next = self.return_to.take().unwrap_or(Page::Home);
        self.navigate_to(next)
    }

    /// Forget the user and everything tied to them.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.cart_count = self.guest_cart.item_count();
        self.return_to = None;
        self.checkout_step = CheckoutStep::Shipping;
        self.page = Page::Home;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// Check if the session has been idle longer than `timeout`.
    pub fn is_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        let idle = now.signed_duration_since(self.last_activity);
        idle.to_std().map(|idle| idle > timeout).unwrap_or(false)
    }

    /// Reset an idle session, keeping only the language.
    ///
    /// Returns `true` if the session had expired.
    pub fn expire_if_idle(&mut self, now: DateTime<Utc>, timeout: Duration) -> bool {
        if !self.is_expired(now, timeout) {
            return false;
        }
        tracing::debug!(idle_since = %self.last_activity, "session expired");
        let lang = self.lang;
        *self = Self::new(self.guest_cart.currency);
        self.lang = lang;
        self.last_activity = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            uid: UserId::new("u1"),
            email: "ana@example.com".into(),
            display_name: "Ana Lopez".into(),
            email_verified: false,
        }
    }

    #[test]
    fn test_defaults() {
        let session = SessionState::default();
        assert_eq!(session.page, Page::Home);
        assert_eq!(session.lang, Lang::ES);
        assert_eq!(session.auth_tab, AuthTab::Login);
        assert_eq!(session.cart_count, 0);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_protected_page_redirects_then_returns() {
        let mut session = SessionState::default();
        assert_eq!(session.navigate_to(Page::Orders), Page::Auth);
        assert_eq!(session.page, Page::Auth);

        assert_eq!(session.sign_in(user()), Page::Orders);
        assert_eq!(session.user_id(), Some(UserId::new("u1")));
    }

    #[test]
    fn test_public_pages_need_no_user() {
        let mut session = SessionState::default();
        assert_eq!(session.navigate_to(Page::Cart), Page::Cart);
        session.search("  mouse ");
        assert_eq!(session.page, Page::Products);
        assert_eq!(session.search_query, "mouse");
        session.select_category(Some(" ".into()));
        assert_eq!(session.selected_category, None);
    }

    #[test]
    fn test_sign_out_shows_guest_count() {
        let mut session = SessionState::default();
        session.sign_in(user());
        session.cart_count = 7;
        session.sign_out();
        assert!(!session.is_signed_in());
        assert_eq!(session.cart_count, 0);
        assert_eq!(session.page, Page::Home);
    }

    #[test]
    fn test_expiry_keeps_language() {
        let mut session = SessionState::default();
        session.lang = Lang::EN;
        session.sign_in(user());
        let start = session.last_activity;
        let timeout = Duration::from_secs(3600);

        assert!(!session.expire_if_idle(start + chrono::Duration::seconds(3600), timeout));
        assert!(session.is_signed_in());

        assert!(session.expire_if_idle(start + chrono::Duration::seconds(3601), timeout));
        assert!(!session.is_signed_in());
        assert_eq!(session.lang, Lang::EN);
    }

    #[test]
    fn test_serde() {
        let mut session = SessionState::default();
        session.view_product(ProductId::new("prod_001"));
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
