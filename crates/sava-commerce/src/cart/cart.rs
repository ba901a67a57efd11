//! Cart and line item types.

use crate::cart::{compute_totals, PricingPolicy, Totals};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// A shopping cart.
///
/// Line items are unique by product and always hold a quantity of at
/// least one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Cart currency; every line must be priced in it.
    pub currency: Currency,
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Build a cart from stored line items, merging duplicates.
    pub fn from_items(
        currency: Currency,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Result<Self, CommerceError> {
        let mut cart = Self::new(currency);
        for item in items {
            cart.add_line(item)?;
        }
        Ok(cart)
    }

    /// Add `quantity` units of a product.
    ///
    /// Increments the existing line for the product, or appends a new one.
    /// Returns an error if:
    /// - Quantity is below one
    /// - The resulting quantity would exceed MAX_QUANTITY_PER_ITEM
    /// - The product is priced in another currency
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        self.add_line(LineItem::from_product(product, quantity)?)
    }

    /// Add a prepared line item, merging with an existing line.
    pub fn add_line(&mut self, item: LineItem) -> Result<(), CommerceError> {
        if item.quantity < 1 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            tracing::debug!(product_id = %item.product_id, quantity = new_quantity, "merged cart line");
            return Ok(());
        }

        if item.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        tracing::debug!(product_id = %item.product_id, quantity = item.quantity, "added cart line");
        self.items.push(item);
        Ok(())
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Returns `Ok(false)`
    /// without touching the cart when the product is not in it.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(product_id));
        }

        let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) else {
            return Ok(false);
        };
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        item.quantity = quantity;
        tracing::debug!(%product_id, quantity, "updated cart line");
        Ok(true)
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Merge another cart into this one (e.g., when a guest signs in).
    ///
    /// Quantities that would exceed the limit are capped at MAX_QUANTITY_PER_ITEM.
    pub fn merge(&mut self, other: Cart) -> Result<(), CommerceError> {
        for mut item in other.items {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.product_id == item.product_id)
            {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
            } else {
                item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                self.add_line(item)?;
            }
        }
        Ok(())
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product ID.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// All lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Compute totals under a pricing policy.
    pub fn totals(&self, policy: &PricingPolicy) -> Result<Totals, CommerceError> {
        compute_totals(&self.items, policy)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased; unique within a cart.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at the time the item was added.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Quantity, at least one.
    pub quantity: i64,
    /// Image URL (denormalized for display).
    #[serde(rename = "image", default)]
    pub image_ref: String,
}

impl LineItem {
    /// Snapshot a product into a line item.
    pub fn from_product(product: &Product, quantity: i64) -> Result<Self, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image_ref: product.primary_image_url().to_string(),
        })
    }

    /// unit_price * quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price.checked_mul_quantity(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_minor(cents, Currency::USD))
            .with_stock(100)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new(Currency::USD);
        cart.add(&product("prod-1", 1000), 2).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
        let line = cart.get(&ProductId::new("prod-1")).unwrap();
        assert_eq!(line.name, "Product prod-1");
        assert_eq!(line.image_ref, crate::catalog::PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_add_same_item_merges_quantity() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);

        cart.add(&p, 2).unwrap();
        cart.add(&p, 3).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new(Currency::USD);
        cart.add(&product("b", 100), 1).unwrap();
        cart.add(&product("a", 100), 1).unwrap();
        cart.add(&product("b", 100), 1).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new(Currency::USD);
        assert_eq!(
            cart.add(&product("prod-1", 1000), 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add(&product("prod-1", 1000), -3),
            Err(CommerceError::InvalidQuantity(-3))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        cart.add(&p, MAX_QUANTITY_PER_ITEM).unwrap();

        let result = cart.add(&p, 1);
        assert_eq!(
            result,
            Err(CommerceError::QuantityExceedsLimit(
                MAX_QUANTITY_PER_ITEM + 1,
                MAX_QUANTITY_PER_ITEM
            ))
        );
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_currency_mismatch() {
        let mut cart = Cart::new(Currency::USD);
        let euro = Product::new("eu", "Euro thing", Money::from_minor(100, Currency::EUR));
        assert!(matches!(
            cart.add(&euro, 1),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        cart.add(&p, 4).unwrap();

        assert!(cart.update_quantity(&p.id, 2).unwrap());
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_quantity_is_idempotent() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        cart.add(&p, 1).unwrap();

        cart.update_quantity(&p.id, 7).unwrap();
        let once = cart.clone();
        cart.update_quantity(&p.id, 7).unwrap();
        assert_eq!(cart, once);
    }

    #[test]
    fn test_update_to_zero_removes_then_absent_is_noop() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        cart.add(&p, 3).unwrap();

        assert!(cart.update_quantity(&p.id, 0).unwrap());
        assert!(cart.is_empty());

        assert!(!cart.update_quantity(&p.id, 5).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_over_limit_is_noop() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        assert_eq!(cart.update_quantity(&p.id, 100), Ok(false));

        cart.add(&p, 1).unwrap();
        assert!(matches!(
            cart.update_quantity(&p.id, 100),
            Err(CommerceError::QuantityExceedsLimit(100, 99))
        ));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_negative_removes() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        cart.add(&p, 3).unwrap();
        assert!(cart.update_quantity(&p.id, -1).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new(Currency::USD);
        let p = product("prod-1", 1000);
        cart.add(&p, 1).unwrap();

        assert!(cart.remove(&p.id));
        assert!(cart.is_empty());
        assert!(!cart.remove(&p.id));
    }

    #[test]
    fn test_merge_caps_quantity() {
        let p = product("prod-1", 1000);
        let q = product("prod-2", 500);

        let mut signed_in = Cart::new(Currency::USD);
        signed_in.add(&p, 90).unwrap();

        let mut guest = Cart::new(Currency::USD);
        guest.add(&p, 20).unwrap();
        guest.add(&q, 1).unwrap();

        signed_in.merge(guest).unwrap();
        assert_eq!(signed_in.get(&p.id).unwrap().quantity, MAX_QUANTITY_PER_ITEM);
        assert_eq!(signed_in.get(&q.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let p = product("prod-1", 1000);
        let items = vec![
            LineItem::from_product(&p, 1).unwrap(),
            LineItem::from_product(&p, 2).unwrap(),
        ];
        let cart = Cart::from_items(Currency::USD, items).unwrap();
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_line_item_document_shape() {
        let line = LineItem::from_product(&product("prod_123", 2999), 2).unwrap();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["product_id"], "prod_123");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["price"]["amount"], "29.99");
        assert!(json.get("image").is_some());
    }
}
