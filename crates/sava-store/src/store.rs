//! Store traits.

use crate::StoreError;
use sava_auth::UserProfile;
use sava_commerce::prelude::*;

/// Read access to the product catalog.
pub trait CatalogStore {
    /// Products matching the query's category, search and limit.
    fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError>;

    /// A single product, `None` if it does not exist.
    fn get_product_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Distinct category names, sorted.
    fn get_categories(&self) -> Result<Vec<String>, StoreError>;
}

/// Per-user cart persistence.
pub trait CartStore {
    /// Lines of the user's cart in insertion order. Empty if none.
    fn get_user_cart(&self, user_id: &UserId) -> Result<Vec<LineItem>, StoreError>;

    /// Add units of a product, merging with an existing line.
    ///
    /// Fails with `ProductNotFound`, `InsufficientStock` when the resulting
    /// quantity exceeds stock, or `InvalidQuantity`.
    fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StoreError>;

    /// Set a line's quantity; zero or less deletes it.
    ///
    /// Returns `false` when the product is not in the cart.
    fn update_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, StoreError>;

    /// Remove every line from the user's cart.
    fn clear_cart(&self, user_id: &UserId) -> Result<(), StoreError>;
}

/// Order history.
pub trait OrderStore {
    /// The user's orders, newest first.
    fn get_user_orders(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError>;

    /// Turn the user's cart into an order.
    ///
    /// Checks stock for every line, snapshots totals under `policy`,
    /// decrements stock and clears the cart. Nothing changes on failure.
    fn place_order(
        &self,
        user_id: &UserId,
        draft: OrderDraft,
        policy: &PricingPolicy,
    ) -> Result<Order, StoreError>;
}

/// Accounts.
pub trait AccountStore {
    /// Check credentials. Unknown emails and wrong passwords both fail
    /// with `InvalidCredentials`.
    fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, StoreError>;

    /// Register a new account.
    fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserProfile, StoreError>;

    /// Look up an account by ID.
    fn get_user(&self, uid: &UserId) -> Result<Option<UserProfile>, StoreError>;
}

/// Everything the storefront needs from its backing store.
pub trait Store: CatalogStore + CartStore + OrderStore + AccountStore {}

impl<T> Store for T where T: CatalogStore + CartStore + OrderStore + AccountStore {}
