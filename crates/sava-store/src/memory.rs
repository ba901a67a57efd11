//! In-memory store with optional JSON snapshot persistence.

use crate::sample::{sample_products, sample_products_in};
use crate::{AccountStore, CartStore, CatalogStore, OrderStore, StoreError};
use sava_auth::{AuthError, Email, UserCredentials, UserProfile};
use sava_commerce::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Everything the store holds. This is also the snapshot file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    /// Currency carts are kept in.
    #[serde(default)]
    pub currency: Currency,
    /// Catalog in display order.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Cart lines per user.
    #[serde(default)]
    pub carts: BTreeMap<UserId, Vec<LineItem>>,
    /// Orders in placement order.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Accounts.
    #[serde(default)]
    pub users: Vec<UserCredentials>,
}

/// Store backed by process memory.
///
/// When opened from a file every successful mutation rewrites the snapshot.
/// A mutation whose snapshot write fails leaves the in-memory state as it
/// was. Concurrent writers are not coordinated; the last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing state.
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
            snapshot_path: None,
        }
    }

    /// Create a store holding the given products.
    ///
    /// Carts are kept in the currency of the first product, USD when empty.
    pub fn with_products(products: Vec<Product>) -> Self {
        let currency = products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or_default();
        Self::from_state(StoreState {
            currency,
            products,
            ..StoreState::default()
        })
    }

    /// Create a store seeded with the demo catalog.
    pub fn with_sample_catalog() -> Self {
        Self::with_products(sample_products())
    }

    /// Create a store seeded with the demo catalog priced in `currency`.
    pub fn with_sample_catalog_in(currency: Currency) -> Self {
        Self::with_products(sample_products_in(currency))
    }

    /// Open a snapshot file, seeding the demo catalog in `currency` if it
    /// does not exist yet.
    ///
    /// An existing snapshot kept in another currency is rejected.
    pub fn open(path: impl AsRef<Path>, currency: Currency) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let state = if path.exists() {
            let text = fs::read_to_string(path)?;
            let state: StoreState = serde_json::from_str(&text)?;
            if state.currency != currency {
                return Err(StoreError::Database(format!(
                    "snapshot {} is kept in {}, not {}",
                    path.display(),
                    state.currency.code(),
                    currency.code()
                )));
            }
            tracing::debug!(
                path = %path.display(),
                products = state.products.len(),
                orders = state.orders.len(),
                "loaded store snapshot"
            );
            state
        } else {
            tracing::info!(path = %path.display(), "seeding new store with sample catalog");
            let state = StoreState {
                currency,
                products: sample_products_in(currency),
                ..StoreState::default()
            };
            write_snapshot(path, &state)?;
            state
        };

        Ok(Self {
            state: RwLock::new(state),
            snapshot_path: Some(path.to_path_buf()),
        })
    }

    /// Write the current state to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let state = self.read()?;
        write_snapshot(path.as_ref(), &state)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<StoreState, StoreError> {
        Ok(self.read()?.clone())
    }

    /// Currency carts and orders are kept in.
    pub fn currency(&self) -> Result<Currency, StoreError> {
        Ok(self.read()?.currency)
    }

    /// Insert a product or replace the one with the same ID.
    pub fn upsert_product(&self, product: Product) -> Result<(), StoreError> {
        self.commit(|state| {
            match state.products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => state.products.push(product),
            }
            Ok(())
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }

    /// Run `change` against a copy of the state and swap the copy in once
    /// the snapshot has been written.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.write()?;
        let mut next = state.clone();
        let value = change(&mut next)?;
        if let Some(path) = &self.snapshot_path {
            write_snapshot(path, &next)?;
        }
        *state = next;
        Ok(value)
    }
}

fn write_snapshot(path: &Path, state: &StoreState) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn find_product<'a>(state: &'a StoreState, id: &ProductId) -> Option<&'a Product> {
    state.products.iter().find(|p| &p.id == id)
}

fn load_cart(state: &StoreState, user_id: &UserId) -> Result<Cart, StoreError> {
    let items = state.carts.get(user_id).cloned().unwrap_or_default();
    Ok(Cart::from_items(state.currency, items)?)
}

fn has_line(state: &StoreState, user_id: &UserId, product_id: &ProductId) -> bool {
    state
        .carts
        .get(user_id)
        .is_some_and(|lines| lines.iter().any(|line| &line.product_id == product_id))
}

fn save_cart(state: &mut StoreState, user_id: &UserId, cart: Cart) {
    if cart.is_empty() {
        state.carts.remove(user_id);
    } else {
        state.carts.insert(user_id.clone(), cart.into_items());
    }
}

impl CatalogStore for MemoryStore {
    fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        let state = self.read()?;
        Ok(query.filter(&state.products))
    }

    fn get_product_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let state = self.read()?;
        Ok(find_product(&state, id).cloned())
    }

    fn get_categories(&self) -> Result<Vec<String>, StoreError> {
        let state = self.read()?;
        let categories: BTreeSet<&str> = state
            .products
            .iter()
            .map(|p| p.category.trim())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(categories.into_iter().map(str::to_string).collect())
    }
}

impl CartStore for MemoryStore {
    fn get_user_cart(&self, user_id: &UserId) -> Result<Vec<LineItem>, StoreError> {
        let state = self.read()?;
        Ok(state.carts.get(user_id).cloned().unwrap_or_default())
    }

    fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity).into());
        }

        self.commit(|state| {
            let product = find_product(state, product_id)
                .cloned()
                .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;

            let mut cart = load_cart(state, user_id)?;
            let in_cart = cart.get(product_id).map_or(0, |line| line.quantity);
            product.check_stock(in_cart.saturating_add(quantity))?;
            cart.add(&product, quantity)?;

            save_cart(state, user_id, cart);
            Ok(())
        })?;

        tracing::debug!(%user_id, %product_id, quantity, "added to cart");
        Ok(())
    }

    fn update_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, StoreError> {
        if !has_line(&*self.read()?, user_id, product_id) {
            return Ok(false);
        }

        let changed = self.commit(|state| {
            let mut cart = load_cart(state, user_id)?;
            if quantity > 0 && cart.get(product_id).is_some() {
                if let Some(product) = find_product(state, product_id) {
                    product.check_stock(quantity)?;
                }
            }

            let changed = cart.update_quantity(product_id, quantity)?;
            if changed {
                save_cart(state, user_id, cart);
            }
            Ok(changed)
        })?;

        if changed {
            tracing::debug!(%user_id, %product_id, quantity, "updated cart item");
        }
        Ok(changed)
    }

    fn clear_cart(&self, user_id: &UserId) -> Result<(), StoreError> {
        if !self.read()?.carts.contains_key(user_id) {
            return Ok(());
        }
        self.commit(|state| {
            state.carts.remove(user_id);
            Ok(())
        })
    }
}

impl OrderStore for MemoryStore {
    fn get_user_orders(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        let state = self.read()?;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .rev()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    fn place_order(
        &self,
        user_id: &UserId,
        draft: OrderDraft,
        policy: &PricingPolicy,
    ) -> Result<Order, StoreError> {
        draft.validate()?;

        let order = self.commit(|state| {
            let cart = load_cart(state, user_id)?;
            if cart.is_empty() {
                return Err(CommerceError::Cart("cart is empty".into()).into());
            }

            for line in cart.items() {
                find_product(state, &line.product_id)
                    .ok_or_else(|| CommerceError::ProductNotFound(line.product_id.to_string()))?
                    .check_stock(line.quantity)?;
            }

            let totals = cart.totals(policy)?;
            let order = Order::place(user_id.clone(), cart.into_items(), totals, draft)?;

            for line in &order.items {
                if let Some(product) = state.products.iter_mut().find(|p| p.id == line.product_id) {
                    product.stock -= line.quantity;
                }
            }
            state.orders.push(order.clone());
            state.carts.remove(user_id);
            Ok(order)
        })?;

        tracing::info!(
            order_id = %order.id,
            %user_id,
            total = %order.totals.total,
            "order placed"
        );
        Ok(order)
    }
}

impl AccountStore for MemoryStore {
    fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, StoreError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let profile = self.commit(|state| {
            let credentials = state
                .users
                .iter_mut()
                .find(|u| u.email == email)
                .ok_or(AuthError::InvalidCredentials)?;
            Ok(credentials.authenticate(password)?)
        })?;

        tracing::info!(user_id = %profile.uid, "user signed in");
        Ok(profile)
    }

    fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserProfile, StoreError> {
        let credentials = UserCredentials::register(email, password, display_name)?;

        let profile = self.commit(|state| {
            if state.users.iter().any(|u| u.email == credentials.email) {
                return Err(AuthError::UserAlreadyExists(credentials.email.to_string()).into());
            }
            let profile = credentials.profile();
            state.users.push(credentials);
            Ok(profile)
        })?;

        tracing::info!(user_id = %profile.uid, "user created");
        Ok(profile)
    }

    fn get_user(&self, uid: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let state = self.read()?;
        Ok(state
            .users
            .iter()
            .find(|u| &u.uid == uid)
            .map(UserCredentials::profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::with_products(vec![
            Product::new("mouse", "Mouse", Money::from_minor(2999, Currency::USD))
                .with_category("Electronics")
                .with_stock(5),
            Product::new("mat", "Yoga Mat", Money::from_minor(2500, Currency::USD))
                .with_category("Sports")
                .with_stock(0),
            Product::new("mug", "Mug", Money::from_minor(1000, Currency::USD))
                .with_category("Home")
                .with_stock(10),
        ])
    }

    fn draft() -> OrderDraft {
        OrderDraft::new(
            Address::new("Ana Torres", "ana@example.com", "Calle 1", "Bogota", "110111"),
            PaymentMethod::Card,
        )
    }

    fn user() -> UserId {
        UserId::new("u1")
    }

    #[test]
    fn test_catalog_queries() {
        let store = store();
        assert_eq!(store.get_products(&ProductQuery::new()).unwrap().len(), 3);
        assert_eq!(
            store
                .get_products(&ProductQuery::new().with_category("home"))
                .unwrap()[0]
                .id
                .as_str(),
            "mug"
        );
        assert_eq!(
            store.get_categories().unwrap(),
            vec!["Electronics", "Home", "Sports"]
        );
        assert!(store
            .get_product_by_id(&ProductId::new("missing"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_add_to_cart_merges() {
        let store = store();
        let mouse = ProductId::new("mouse");
        store.add_to_cart(&user(), &mouse, 2).unwrap();
        store.add_to_cart(&user(), &mouse, 3).unwrap();

        let cart = store.get_user_cart(&user()).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 5);
    }

    #[test]
    fn test_add_to_cart_errors() {
        let store = store();
        let err = store
            .add_to_cart(&user(), &ProductId::new("missing"), 1)
            .unwrap_err();
        assert_eq!(err.code(), "PRODUCT_NOT_FOUND");

        let err = store
            .add_to_cart(&user(), &ProductId::new("mat"), 1)
            .unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        let err = store
            .add_to_cart(&user(), &ProductId::new("mouse"), 0)
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        store.add_to_cart(&user(), &ProductId::new("mouse"), 4).unwrap();
        let err = store
            .add_to_cart(&user(), &ProductId::new("mouse"), 2)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Commerce(CommerceError::InsufficientStock {
                requested: 6,
                available: 5,
                ..
            })
        ));
        assert_eq!(store.get_user_cart(&user()).unwrap()[0].quantity, 4);
    }

    #[test]
    fn test_update_cart_item() {
        let store = store();
        let mouse = ProductId::new("mouse");
        store.add_to_cart(&user(), &mouse, 1).unwrap();

        assert!(store.update_cart_item(&user(), &mouse, 3).unwrap());
        assert_eq!(store.get_user_cart(&user()).unwrap()[0].quantity, 3);

        let err = store.update_cart_item(&user(), &mouse, 6).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        assert!(store.update_cart_item(&user(), &mouse, 0).unwrap());
        assert!(store.get_user_cart(&user()).unwrap().is_empty());
        assert!(!store.update_cart_item(&user(), &mouse, 5).unwrap());
        assert!(store.get_user_cart(&user()).unwrap().is_empty());
    }

    #[test]
    fn test_carts_are_per_user() {
        let store = store();
        store
            .add_to_cart(&user(), &ProductId::new("mouse"), 1)
            .unwrap();
        assert!(store
            .get_user_cart(&UserId::new("someone-else"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_place_order() {
        let store = store();
        store.add_to_cart(&user(), &ProductId::new("mouse"), 2).unwrap();

        let order = store
            .place_order(&user(), draft(), &PricingPolicy::default())
            .unwrap();
        assert_eq!(order.totals.rounded().total.display(), "$64.78");
        assert!(store.get_user_cart(&user()).unwrap().is_empty());

        let mouse = store
            .get_product_by_id(&ProductId::new("mouse"))
            .unwrap()
            .unwrap();
        assert_eq!(mouse.stock, 3);
        assert_eq!(store.get_user_orders(&user()).unwrap(), vec![order]);
    }

    #[test]
    fn test_place_order_failures_change_nothing() {
        let store = store();
        let err = store
            .place_order(&user(), draft(), &PricingPolicy::default())
            .unwrap_err();
        assert_eq!(err.code(), "CART_ERROR");

        store.add_to_cart(&user(), &ProductId::new("mug"), 1).unwrap();
        let mut bad = draft();
        bad.shipping_address.full_name.clear();
        let err = store
            .place_order(&user(), bad, &PricingPolicy::default())
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(store.get_user_cart(&user()).unwrap().len(), 1);
        assert!(store.get_user_orders(&user()).unwrap().is_empty());
    }

    #[test]
    fn test_orders_newest_first() {
        let store = store();
        let mut ids = Vec::new();
        for _ in 0..3 {
            store.add_to_cart(&user(), &ProductId::new("mug"), 1).unwrap();
            let order = store
                .place_order(&user(), draft(), &PricingPolicy::default())
                .unwrap();
            ids.push(order.id);
        }
        let listed: Vec<OrderId> = store
            .get_user_orders(&user())
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        ids.reverse();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_accounts() {
        let store = store();
        let created = store
            .create_user("Ana@Example.com", "SecurePass1", "Ana Torres")
            .unwrap();
        assert_eq!(created.email, "ana@example.com");

        let err = store
            .create_user("ana@example.com", "SecurePass1", "Other")
            .unwrap_err();
        assert!(matches!(err, StoreError::Auth(AuthError::UserAlreadyExists(_))));

        let profile = store.sign_in("ana@example.com", "SecurePass1").unwrap();
        assert_eq!(profile.uid, created.uid);
        assert_eq!(store.get_user(&created.uid).unwrap(), Some(created));

        let err = store.sign_in("ana@example.com", "wrong").unwrap_err();
        assert_eq!(err.code(), "AUTH_ERROR");
        let err = store.sign_in("nobody@example.com", "SecurePass1").unwrap_err();
        assert_eq!(err.code(), "AUTH_ERROR");
    }

    #[test]
    fn test_sign_in_with_malformed_email_is_bad_credentials() {
        let store = store();
        let err = store.sign_in("not-an-email", "SecurePass1").unwrap_err();
        assert!(matches!(err, StoreError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(err.code(), "AUTH_ERROR");
    }

    #[test]
    fn test_carts_follow_catalog_currency() {
        let store = MemoryStore::with_sample_catalog_in(Currency::EUR);
        assert_eq!(store.currency().unwrap(), Currency::EUR);

        store.add_to_cart(&user(), &ProductId::new("prod_001"), 1).unwrap();
        assert_eq!(
            store.get_user_cart(&user()).unwrap()[0].unit_price.currency,
            Currency::EUR
        );
        assert_eq!(MemoryStore::new().currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_upsert_product() {
        let store = store();
        let updated = Product::new("mug", "Big Mug", Money::from_minor(1500, Currency::USD));
        store.upsert_product(updated.clone()).unwrap();
        assert_eq!(
            store.get_product_by_id(&updated.id).unwrap(),
            Some(updated)
        );
        assert_eq!(store.snapshot().unwrap().products.len(), 3);
    }
}
