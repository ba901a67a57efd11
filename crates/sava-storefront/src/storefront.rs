//! Page handlers and shopper actions.
//!
//! Page handlers never fail: store problems are turned into a [`Notice`]
//! and an empty or sample view. Actions return a [`StorefrontError`] the
//! caller shows with [`Storefront::notice_for`].

use crate::config::{Settings, APP_NAME};
use crate::error::{ErrorHandler, Notice, StorefrontError};
use crate::page::Page;
use crate::session::{AuthTab, CheckoutStep, SessionState};
use crate::views::*;
use chrono::{DateTime, Utc};
use sava_auth::{AuthError, UserProfile};
use sava_commerce::catalog::Product;
use sava_commerce::prelude::*;
use sava_store::sample::sample_products_in;
use sava_store::Store;

/// Featured products on the home page.
pub const FEATURED_LIMIT: usize = 8;

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub user: UserProfile,
    /// Page to show next.
    pub next: Page,
    /// Guest cart lines that could not be carried over.
    pub skipped: Vec<ProductId>,
}

/// The storefront over a backing store.
pub struct Storefront<S> {
    store: S,
    settings: Settings,
    errors: ErrorHandler,
}

impl<S: Store> Storefront<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        let errors = ErrorHandler::new(settings.debug);
        Self {
            store,
            settings,
            errors,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.settings.pricing
    }

    /// Fresh session priced in the configured currency.
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.pricing().currency())
    }

    /// Notice for a failed action.
    pub fn notice_for(&self, err: &StorefrontError) -> Notice {
        self.errors.handle(err, None)
    }

    /// Expire an idle session and mark it active.
    pub fn begin_request(&self, session: &mut SessionState, now: DateTime<Utc>) -> Option<Notice> {
        let expired = session.expire_if_idle(now, self.settings.cart_session_timeout);
        session.touch(now);
        expired.then(|| Notice::info("Your session expired. Please sign in again."))
    }

    /// Render whatever page the session is on.
    pub fn route(&self, session: &mut SessionState) -> Response<PageView> {
        let expired = self.begin_request(session, Utc::now());
        let page = session.navigate_to(session.page);
        let mut response = match page {
            Page::Home => self.home(session).map(PageView::Home),
            Page::Products => self.products(session, 1).map(PageView::Products),
            Page::ProductDetail => self.product_detail(session).map(PageView::ProductDetail),
            Page::Cart => self.cart(session).map(PageView::Cart),
            Page::Checkout => self.checkout(session).map(PageView::Checkout),
            Page::Auth => Response::render(PageView::Auth(self.auth(session))),
            Page::Account => self.account(session).map(PageView::Account),
            Page::Orders => self.orders(session, 1).map(PageView::Orders),
            Page::About => Response::render(PageView::About(self.about(session))),
        };
        if let Some(notice) = expired {
            response.notices.insert(0, notice);
        }
        response
    }

    // Pages

    pub fn home(&self, session: &SessionState) -> Response<HomeView> {
        let labels = session.lang.labels();
        let query = ProductQuery::new().with_limit(FEATURED_LIMIT);

        let (products, mut notice) = self.errors.safe_execute(
            || self.store.get_products(&query),
            Vec::new(),
            Some("Could not load products. Showing sample products."),
        );
        let is_sample = products.is_empty();
        let products = if is_sample {
            if notice.is_none() {
                tracing::warn!("catalog is empty, showing sample products");
            }
            query.filter(&sample_products_in(self.pricing().currency()))
        } else {
            products
        };

        let (categories, categories_notice) =
            self.errors
                .safe_execute(|| self.store.get_categories(), Vec::new(), None);
        notice = notice.or(categories_notice);

        Response::render(HomeView {
            title: labels.page_home_title.to_string(),
            featured: products.iter().map(ProductCard::from).collect(),
            categories,
            is_sample,
        })
        .with_notice(notice)
    }

    /// One page of the listing for the session's category and search.
    pub fn products(&self, session: &SessionState, page: usize) -> Response<ProductListView> {
        let labels = session.lang.labels();
        let mut query = ProductQuery::new()
            .with_search(session.search_query.clone())
            .with_pagination(page, self.settings.products_per_page);
        if let Some(category) = &session.selected_category {
            query = query.with_category(category.clone());
        }

        let (products, notice) = self.errors.safe_execute(
            || self.store.get_products(&query),
            Vec::new(),
            Some("Could not load products."),
        );
        let (categories, _) =
            self.errors
                .safe_execute(|| self.store.get_categories(), Vec::new(), None);
        let results = query.paginate(products);

        Response::render(ProductListView {
            title: labels.page_products.to_string(),
            empty_message: results.is_empty().then(|| labels.no_products.to_string()),
            products: results.items.iter().map(ProductCard::from).collect(),
            categories,
            selected_category: query.category.clone(),
            search_query: session.search_query.clone(),
            pagination: results.pagination,
        })
        .with_notice(notice)
    }

    pub fn product_detail(&self, session: &SessionState) -> Response<ProductDetailView> {
        let Some(product_id) = &session.selected_product_id else {
            return Response::redirect(Page::Products);
        };

        let product = match self.store.get_product_by_id(product_id) {
            Ok(Some(product)) => product,
            Ok(None) => {
                let err = CommerceError::ProductNotFound(product_id.to_string()).into();
                return Response::redirect(Page::Products).with_notice(Some(self.notice_for(&err)));
            }
            Err(err) => {
                let notice = self.errors.handle(&err.into(), Some("Could not load the product."));
                return Response::redirect(Page::Products).with_notice(Some(notice));
            }
        };

        let labels = session.lang.labels();
        let stock_label = if product.is_in_stock() {
            format!("{} ({})", labels.in_stock, product.stock)
        } else {
            labels.out_of_stock.to_string()
        };

        Response::render(ProductDetailView {
            product: ProductCard::from(&product),
            description: product.description.clone(),
            stock: product.stock,
            stock_label,
            max_quantity: product.max_purchasable(),
            images: product.images.iter().map(|image| image.url.clone()).collect(),
        })
    }

    pub fn cart(&self, session: &mut SessionState) -> Response<CartView> {
        let labels = session.lang.labels();
        let (cart, notice) = match self.active_cart(session) {
            Ok(cart) => (cart, None),
            Err(err) => (
                Cart::new(self.pricing().currency()),
                Some(self.errors.handle(&err, Some("Could not load your cart."))),
            ),
        };
        session.cart_count = cart.item_count();

        let view = self.cart_view(&cart, session).map(|(lines, summary)| CartView {
            title: labels.page_cart.to_string(),
            item_count: cart.item_count(),
            empty_message: cart.is_empty().then(|| labels.cart_empty.to_string()),
            summary: (!cart.is_empty()).then_some(summary),
            lines,
            is_guest: !session.is_signed_in(),
        });

        match view {
            Ok(view) => Response::render(view).with_notice(notice),
            Err(err) => Response::redirect(Page::Home).with_notice(Some(self.notice_for(&err))),
        }
    }

    pub fn checkout(&self, session: &mut SessionState) -> Response<CheckoutView> {
        let Some(user) = session.user.clone() else {
            session.navigate_to(Page::Checkout);
            return Response::redirect(Page::Auth);
        };
        let labels = session.lang.labels();

        let cart = match self.active_cart(session) {
            Ok(cart) => cart,
            Err(err) => {
                let notice = self.errors.handle(&err, Some("Could not load your cart."));
                return Response::redirect(Page::Cart).with_notice(Some(notice));
            }
        };
        session.cart_count = cart.item_count();
        if cart.is_empty() {
            return Response::redirect(Page::Cart)
                .with_notice(Some(Notice::info(labels.cart_empty)));
        }

        match self.cart_view(&cart, session) {
            Ok((lines, summary)) => Response::render(CheckoutView {
                title: labels.page_checkout.to_string(),
                step: session.checkout_step,
                lines,
                summary,
                payment_options: PaymentMethod::ALL
                    .into_iter()
                    .map(|method| PaymentOption {
                        method,
                        label: labels.payment_method(method).to_string(),
                    })
                    .collect(),
                full_name: user.display_name.clone(),
                email: user.email.clone(),
            }),
            Err(err) => Response::redirect(Page::Cart).with_notice(Some(self.notice_for(&err))),
        }
    }

    /// One page of the signed-in user's orders, newest first.
    pub fn orders(&self, session: &mut SessionState, page: usize) -> Response<OrderListView> {
        let Some(user_id) = session.user_id() else {
            session.navigate_to(Page::Orders);
            return Response::redirect(Page::Auth);
        };
        let labels = session.lang.labels();

        let (orders, notice) = self.errors.safe_execute(
            || self.store.get_user_orders(&user_id),
            Vec::new(),
            Some("Could not load your orders."),
        );
        let pagination = Pagination::new(page, self.settings.orders_per_page, orders.len());
        let shown = orders
            .iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .map(|order| OrderSummaryView::new(order, labels))
            .collect::<Result<Vec<_>, _>>();

        match shown {
            Ok(shown) => Response::render(OrderListView {
                title: labels.page_orders.to_string(),
                empty_message: orders.is_empty().then(|| labels.no_orders.to_string()),
                orders: shown,
                pagination,
            })
            .with_notice(notice),
            Err(err) => Response::redirect(Page::Home).with_notice(Some(self.notice_for(&err.into()))),
        }
    }

    pub fn account(&self, session: &mut SessionState) -> Response<AccountView> {
        let Some(user) = session.user.clone() else {
            session.navigate_to(Page::Account);
            return Response::redirect(Page::Auth);
        };
        let (orders, notice) = self.errors.safe_execute(
            || self.store.get_user_orders(&user.uid),
            Vec::new(),
            None,
        );

        Response::render(AccountView {
            title: session.lang.labels().page_account.to_string(),
            first_name: user.first_name().to_string(),
            display_name: user.display_name,
            email: user.email,
            email_verified: user.email_verified,
            order_count: orders.len(),
        })
        .with_notice(notice)
    }

    pub fn auth(&self, session: &SessionState) -> AuthView {
        let labels = session.lang.labels();
        AuthView {
            tab: session.auth_tab,
            heading: match session.auth_tab {
                AuthTab::Login => labels.nav_signin.to_string(),
                AuthTab::Register => labels.nav_signup.to_string(),
            },
            continue_to: session.return_to,
        }
    }

    pub fn about(&self, session: &SessionState) -> AboutView {
        let labels = session.lang.labels();
        AboutView {
            title: labels.page_about.to_string(),
            body: labels.about_body.to_string(),
            app_name: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    // Actions

    /// Add units to the active cart and return the new badge count.
    pub fn add_to_cart(
        &self,
        session: &mut SessionState,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<i64, StorefrontError> {
        match session.user_id() {
            Some(user_id) => self.store.add_to_cart(&user_id, product_id, quantity)?,
            None => {
                let product = self.require_product(product_id)?;
                if quantity < 1 {
                    return Err(CommerceError::InvalidQuantity(quantity).into());
                }
                let in_cart = session.guest_cart.get(product_id).map_or(0, |line| line.quantity);
                product.check_stock(in_cart.saturating_add(quantity))?;
                session.guest_cart.add(&product, quantity)?;
            }
        }
        tracing::debug!(%product_id, quantity, "added to cart");
        self.refresh_cart_count(session)
    }

    /// Set a line's quantity; zero or less removes it.
    ///
    /// Returns `false` without changing anything when the product is not
    /// in the cart.
    pub fn update_cart_item(
        &self,
        session: &mut SessionState,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, StorefrontError> {
        let updated = match session.user_id() {
            Some(user_id) => self.store.update_cart_item(&user_id, product_id, quantity)?,
            None => {
                if quantity > 0 && session.guest_cart.get(product_id).is_some() {
                    if let Some(product) = self.store.get_product_by_id(product_id)? {
                        product.check_stock(quantity)?;
                    }
                }
                session.guest_cart.update_quantity(product_id, quantity)?
            }
        };
        if !updated {
            tracing::debug!(%product_id, "update ignored, product not in cart");
        }
        self.refresh_cart_count(session)?;
        Ok(updated)
    }

    pub fn remove_from_cart(
        &self,
        session: &mut SessionState,
        product_id: &ProductId,
    ) -> Result<bool, StorefrontError> {
        self.update_cart_item(session, product_id, 0)
    }

    /// Empty the active cart.
    pub fn clear_cart(&self, session: &mut SessionState) -> Result<(), StorefrontError> {
        match session.user_id() {
            Some(user_id) => self.store.clear_cart(&user_id)?,
            None => session.guest_cart.clear(),
        }
        session.cart_count = 0;
        Ok(())
    }

    /// Recompute the cart badge from the active cart.
    pub fn refresh_cart_count(&self, session: &mut SessionState) -> Result<i64, StorefrontError> {
        let count = self.active_cart(session)?.item_count();
        session.cart_count = count;
        Ok(count)
    }

    /// Place an order for the signed-in user's cart.
    pub fn place_order(
        &self,
        session: &mut SessionState,
        draft: OrderDraft,
    ) -> Result<Order, StorefrontError> {
        let user_id = session.user_id().ok_or(AuthError::NotSignedIn)?;
        draft.validate()?;

        let order = self.store.place_order(&user_id, draft, self.pricing())?;
        session.cart_count = 0;
        session.checkout_step = CheckoutStep::Complete;
        tracing::info!(
            %user_id,
            order_id = %order.id,
            total = %order.totals.total.rounded(),
            "order placed"
        );
        Ok(order)
    }

    /// Sign in and carry the guest cart over to the account.
    pub fn sign_in(
        &self,
        session: &mut SessionState,
        email: &str,
        password: &str,
    ) -> Result<SignedIn, StorefrontError> {
        let user = self.store.sign_in(email, password)?;
        self.start_session(session, user)
    }

    /// Create an account and sign in with it.
    pub fn sign_up(
        &self,
        session: &mut SessionState,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignedIn, StorefrontError> {
        let user = self.store.create_user(email, password, display_name)?;
        self.start_session(session, user)
    }

    pub fn sign_out(&self, session: &mut SessionState) {
        if let Some(user_id) = session.user_id() {
            tracing::info!(%user_id, "signed out");
        }
        session.sign_out();
    }

    // Helpers

    fn start_session(
        &self,
        session: &mut SessionState,
        user: UserProfile,
    ) -> Result<SignedIn, StorefrontError> {
        let skipped = self.merge_guest_cart(&user.uid, &session.guest_cart)?;
        session.guest_cart.clear();
        let next = session.sign_in(user.clone());
        self.refresh_cart_count(session)?;
        Ok(SignedIn {
            user,
            next,
            skipped,
        })
    }

    /// Copy guest lines into the stored cart, capping each line at the
    /// per-item limit. Lines the store rejects are skipped.
    fn merge_guest_cart(
        &self,
        user_id: &UserId,
        guest: &Cart,
    ) -> Result<Vec<ProductId>, StorefrontError> {
        if guest.is_empty() {
            return Ok(Vec::new());
        }
        let stored = Cart::from_items(guest.currency, self.store.get_user_cart(user_id)?)?;

        let mut skipped = Vec::new();
        for line in guest.items() {
            let in_cart = stored.get(&line.product_id).map_or(0, |l| l.quantity);
            let quantity = line.quantity.min(MAX_QUANTITY_PER_ITEM - in_cart);
            if quantity < 1 {
                continue;
            }
            match self.store.add_to_cart(user_id, &line.product_id, quantity) {
                Ok(()) => {}
                Err(err) if err.is_infrastructure() => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(
                        %user_id,
                        product_id = %line.product_id,
                        error_code = err.code(),
                        "guest cart line not merged"
                    );
                    skipped.push(line.product_id.clone());
                }
            }
        }
        tracing::debug!(%user_id, lines = guest.unique_item_count(), skipped = skipped.len(), "merged guest cart");
        Ok(skipped)
    }

    fn active_cart(&self, session: &SessionState) -> Result<Cart, StorefrontError> {
        match session.user_id() {
            Some(user_id) => {
                let items = self.store.get_user_cart(&user_id)?;
                Ok(Cart::from_items(self.pricing().currency(), items)?)
            }
            None => Ok(session.guest_cart.clone()),
        }
    }

    fn require_product(&self, product_id: &ProductId) -> Result<Product, StorefrontError> {
        self.store
            .get_product_by_id(product_id)?
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()).into())
    }

    fn cart_view(
        &self,
        cart: &Cart,
        session: &SessionState,
    ) -> Result<(Vec<CartLineView>, CartSummary), StorefrontError> {
        let totals = cart.totals(self.pricing())?;
        let lines = CartLineView::from_lines(cart.items())?;
        let summary = CartSummary::new(&totals, self.pricing(), session.lang.labels());
        Ok((lines, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use sava_store::{MemoryStore, StoreError};

    fn storefront() -> Storefront<MemoryStore> {
        Storefront::new(
            MemoryStore::with_sample_catalog(),
            Settings::for_environment(Environment::Testing),
        )
    }

    #[test]
    fn test_guest_add_respects_stock() {
        let shop = storefront();
        let mut session = shop.new_session();
        let mouse = ProductId::new("prod_001");

        assert_eq!(shop.add_to_cart(&mut session, &mouse, 2).unwrap(), 2);
        assert_eq!(shop.add_to_cart(&mut session, &mouse, 3).unwrap(), 5);
        assert_eq!(session.guest_cart.unique_item_count(), 1);

        let err = shop
            .add_to_cart(&mut session, &ProductId::new("prod_006"), 1)
            .unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        let err = shop
            .add_to_cart(&mut session, &ProductId::new("nope"), 1)
            .unwrap_err();
        assert_eq!(err.code(), "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn test_guest_update_absent_is_noop() {
        let shop = storefront();
        let mut session = shop.new_session();
        let mouse = ProductId::new("prod_001");

        shop.add_to_cart(&mut session, &mouse, 1).unwrap();
        assert!(shop.remove_from_cart(&mut session, &mouse).unwrap());
        assert!(!shop.update_cart_item(&mut session, &mouse, 5).unwrap());
        assert_eq!(session.cart_count, 0);
    }

    #[test]
    fn test_checkout_requires_user_and_items() {
        let shop = storefront();
        let mut session = shop.new_session();
        assert_eq!(shop.checkout(&mut session).redirected_to(), Some(Page::Auth));
        assert_eq!(session.return_to, Some(Page::Checkout));

        shop.sign_up(&mut session, "ana@example.com", "Secret123", "Ana Lopez")
            .unwrap();
        let response = shop.checkout(&mut session);
        assert_eq!(response.redirected_to(), Some(Page::Cart));
        assert_eq!(response.notices.len(), 1);
    }

    #[test]
    fn test_clear_cart() {
        let shop = storefront();
        let mut session = shop.new_session();
        shop.add_to_cart(&mut session, &ProductId::new("prod_001"), 2).unwrap();
        shop.clear_cart(&mut session).unwrap();
        assert!(session.guest_cart.is_empty());
        assert_eq!(shop.refresh_cart_count(&mut session).unwrap(), 0);
    }

    #[test]
    fn test_place_order_needs_sign_in() {
        let shop = storefront();
        let mut session = shop.new_session();
        let err = shop.place_order(&mut session, OrderDraft::default()).unwrap_err();
        assert_eq!(err.code(), "AUTH_ERROR");
    }

    #[test]
    fn test_product_detail_caps_quantity() {
        let shop = storefront();
        let mut session = shop.new_session();

        session.view_product(ProductId::new("prod_001"));
        let response = shop.product_detail(&session);
        assert_eq!(response.view().unwrap().max_quantity, 10);

        session.view_product(ProductId::new("prod_006"));
        let response = shop.product_detail(&session);
        assert_eq!(response.view().unwrap().max_quantity, 0);

        session.view_product(ProductId::new("missing"));
        let response = shop.product_detail(&session);
        assert_eq!(response.redirected_to(), Some(Page::Products));
        assert_eq!(response.notices[0].code, "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn test_home_falls_back_to_samples() {
        let shop = Storefront::new(MemoryStore::new(), Settings::for_environment(Environment::Testing));
        let session = shop.new_session();
        let view = shop.home(&session).view().cloned().unwrap();
        assert!(view.is_sample);
        assert_eq!(view.featured.len(), FEATURED_LIMIT);
    }

    #[test]
    fn test_database_error_notice() {
        let err: StorefrontError = StoreError::Database("unreachable".into()).into();
        let notice = storefront().notice_for(&err);
        assert_eq!(notice.code, "DB_ERROR");
        assert!(notice.details.is_some());
    }
}
