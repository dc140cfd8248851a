//! Stored data format and the file-backed store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::Value;

use vitrine_core::ProductId;
use vitrine_integration_tests::{TempStore, login, registration};
use vitrine_storefront::models::PageManifest;
use vitrine_storefront::store::{JsonFileStore, KeyValueStore, MemoryStore, keys};
use vitrine_storefront::{Storefront, StorefrontConfig};

fn stored_json(store: &impl KeyValueStore, key: &str) -> Value {
    serde_json::from_str(&store.get(key).unwrap().unwrap()).unwrap()
}

#[test]
fn test_state_survives_reopening_the_file() {
    let tmp = TempStore::new();

    {
        let mut sf = Storefront::new(
            JsonFileStore::new(tmp.path()),
            PageManifest::demo(),
            StorefrontConfig::default(),
        );
        sf.add_to_cart(&ProductId::new("p3")).unwrap();
        sf.register(registration("Ana", "123.456.789-09", "senha"))
            .unwrap();
    }

    let mut sf = Storefront::new(
        JsonFileStore::new(tmp.path()),
        PageManifest::demo(),
        StorefrontConfig::default(),
    );
    assert_eq!(sf.cart_count().unwrap().count, 1);
    assert_eq!(sf.logged_in().unwrap().unwrap().name, "Ana");

    sf.logout().unwrap();
    assert!(sf.login(login("12345678909", "senha")).is_ok());
}

#[test]
fn test_stored_shapes() {
    let store = MemoryStore::new();
    let mut sf = Storefront::new(&store, PageManifest::demo(), StorefrontConfig::default());

    sf.add_to_cart(&ProductId::new("p1")).unwrap();
    sf.add_to_cart(&ProductId::new("p1")).unwrap();
    sf.register(registration("Ana", "123.456.789-09", "senha"))
        .unwrap();

    let cart = stored_json(&store, keys::CART);
    assert_eq!(cart[0]["id"], "p1");
    assert_eq!(cart[0]["name"], "Camiseta Básica");
    assert_eq!(cart[0]["price"], 49.9);
    assert_eq!(cart[0]["quantity"], 2);

    let customers = stored_json(&store, keys::CUSTOMERS);
    let ana = &customers[0];
    assert_eq!(ana["nome"], "Ana");
    assert_eq!(ana["cpf"], "123.456.789-09");
    assert_eq!(ana["endereco"], "Rua das Flores, 10");
    assert_eq!(ana["password"].as_str().unwrap().len(), 64);
    assert!(ana["created"].as_str().unwrap().ends_with('Z'));

    assert_eq!(stored_json(&store, keys::LOGGED_CLIENT)["nome"], "Ana");
}

#[test]
fn test_existing_data_is_read_and_preserved() {
    let store = MemoryStore::with_entries([
        (
            keys::CART,
            r#"[{"id":"p1","name":"Camiseta","price":10,"image":"a.jpg","category":"roupas"},{"id":"p2","name":"Boné","price":5.5,"image":"b.jpg","quantity":3}]"#,
        ),
        (
            keys::REVIEWS,
            r#"[{"name":"Ana","rating":4,"comment":"Bom","date":"2024-05-01T12:00:00.000Z"}]"#,
        ),
    ]);
    let sf = Storefront::new(&store, PageManifest::demo(), StorefrontConfig::default());

    let cart = sf.cart_view().unwrap();
    assert_eq!(cart.item_count, 4);
    assert_eq!(cart.total, "26,50");

    sf.increase(&ProductId::new("p1")).unwrap();
    let stored = stored_json(&store, keys::CART);
    assert_eq!(stored[0]["category"], "roupas");
    assert_eq!(stored[0]["quantity"], 2);
    assert_eq!(stored[0]["price"], 10);

    assert_eq!(sf.review_list().unwrap().entries[0].rating, 4);
}

#[test]
fn test_corrupt_data_reads_as_empty() {
    let store = MemoryStore::with_entries([
        (keys::CART, "{definitely not json"),
        (keys::CUSTOMERS, "[1, 2, 3]"),
        (keys::LOGGED_CLIENT, "\"nobody\""),
    ]);
    let mut sf = Storefront::new(&store, PageManifest::demo(), StorefrontConfig::default());

    assert!(sf.cart_view().unwrap().is_empty());
    assert!(sf.logged_in().unwrap().is_none());

    // Writing replaces the corrupt value
    sf.add_to_cart(&ProductId::new("p2")).unwrap();
    assert_eq!(sf.cart_count().unwrap().count, 1);
    sf.register(registration("Ana", "1", "a")).unwrap();
    assert_eq!(stored_json(&store, keys::CUSTOMERS).as_array().unwrap().len(), 1);
}

#[test]
fn test_corrupt_store_file_recovers_on_next_write() {
    let tmp = TempStore::new();
    std::fs::create_dir_all(tmp.path().parent().unwrap()).unwrap();
    std::fs::write(tmp.path(), "{\"cart\": [trailing").unwrap();

    {
        let mut sf = Storefront::new(
            JsonFileStore::new(tmp.path()),
            PageManifest::demo(),
            StorefrontConfig::default(),
        );
        assert!(sf.cart_view().unwrap().is_empty());
        sf.add_to_cart(&ProductId::new("p1")).unwrap();
        assert_eq!(sf.cart_count().unwrap().count, 1);
    }

    let reopened = JsonFileStore::new(tmp.path());
    let cart = stored_json(&reopened, keys::CART);
    assert_eq!(cart[0]["id"], "p1");
    assert_eq!(cart[0]["quantity"], 1);
}
