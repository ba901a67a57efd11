//! Snapshot persistence through the public API.

use sava_commerce::prelude::*;
use sava_store::{AccountStore, CartStore, CatalogStore, MemoryStore, OrderStore};
use tempfile::TempDir;

#[test]
fn new_snapshot_is_seeded_with_sample_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("store.json");

    let store = MemoryStore::open(&path, Currency::USD).unwrap();
    assert!(path.exists());
    assert_eq!(
        store.get_products(&ProductQuery::new()).unwrap().len(),
        sava_store::sample::sample_products().len()
    );
}

#[test]
fn mutations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let user = UserId::new("u1");

    {
        let store = MemoryStore::open(&path, Currency::USD).unwrap();
        let created = store
            .create_user("ana@example.com", "SecurePass1", "Ana")
            .unwrap();
        store
            .add_to_cart(&created.uid, &ProductId::new("prod_001"), 2)
            .unwrap();
        store
            .add_to_cart(&user, &ProductId::new("prod_007"), 1)
            .unwrap();
        store
            .place_order(
                &user,
                OrderDraft::new(
                    Address::new("Ana", "ana@example.com", "Calle 1", "Bogota", "110111"),
                    PaymentMethod::PayPal,
                ),
                &PricingPolicy::default(),
            )
            .unwrap();
    }

    let store = MemoryStore::open(&path, Currency::USD).unwrap();
    let profile = store.sign_in("ana@example.com", "SecurePass1").unwrap();
    assert_eq!(store.get_user_cart(&profile.uid).unwrap()[0].quantity, 2);
    assert_eq!(store.get_user_orders(&user).unwrap().len(), 1);

    let mug = store
        .get_product_by_id(&ProductId::new("prod_007"))
        .unwrap()
        .unwrap();
    assert_eq!(mug.stock, 74);
}

#[test]
fn corrupt_snapshot_is_a_database_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = MemoryStore::open(&path, Currency::USD).unwrap_err();
    assert_eq!(err.code(), "DB_ERROR");
}

#[test]
fn save_to_writes_a_copy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("copy.json");

    let store = MemoryStore::with_sample_catalog();
    store.save_to(&path).unwrap();

    let reopened = MemoryStore::open(&path, Currency::USD).unwrap();
    assert_eq!(
        reopened.get_categories().unwrap(),
        store.get_categories().unwrap()
    );
}

#[test]
fn failed_snapshot_write_keeps_previous_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let user = UserId::new("u1");

    let store = MemoryStore::open(&path, Currency::USD).unwrap();
    store
        .add_to_cart(&user, &ProductId::new("prod_007"), 2)
        .unwrap();

    // A directory where the temporary snapshot goes makes the write fail.
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    let err = store
        .place_order(
            &user,
            OrderDraft::new(
                Address::new("Ana", "ana@example.com", "Calle 1", "Bogota", "110111"),
                PaymentMethod::Card,
            ),
            &PricingPolicy::default(),
        )
        .unwrap_err();
    assert!(err.is_infrastructure());

    assert_eq!(store.get_user_cart(&user).unwrap()[0].quantity, 2);
    assert!(store.get_user_orders(&user).unwrap().is_empty());
    let mug = store
        .get_product_by_id(&ProductId::new("prod_007"))
        .unwrap()
        .unwrap();
    assert_eq!(mug.stock, 75);

    assert!(store
        .add_to_cart(&user, &ProductId::new("prod_001"), 1)
        .is_err());
    assert_eq!(store.get_user_cart(&user).unwrap().len(), 1);
}

#[test]
fn snapshot_in_other_currency_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let store = MemoryStore::open(&path, Currency::EUR).unwrap();
    assert_eq!(
        store
            .get_product_by_id(&ProductId::new("prod_001"))
            .unwrap()
            .unwrap()
            .price
            .currency,
        Currency::EUR
    );
    drop(store);

    assert!(MemoryStore::open(&path, Currency::EUR).is_ok());
    let err = MemoryStore::open(&path, Currency::USD).unwrap_err();
    assert_eq!(err.code(), "DB_ERROR");
}
