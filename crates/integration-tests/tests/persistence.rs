//! Durable-state behaviour across restarts.

#![allow(clippy::unwrap_used)]

use ecobazaar_core::ProductId;
use ecobazaar_integration_tests::{bearer_token, test_product};
use ecobazaar_storefront::cart::CartStore;
use ecobazaar_storefront::session::SessionStore;
use ecobazaar_storefront::storage::{CART_KEY, Storage, TOKEN_KEY};

#[test]
fn cart_survives_restart_and_corruption_resets_it() {
    let dir = tempfile::tempdir().unwrap();

    {
        let cart = CartStore::open(Storage::new(dir.path()));
        cart.add(&test_product(1, "Bamboo Toothbrush", "12.99"));
        cart.set_quantity(ProductId::new(1), 4);
    }

    // A fresh process sees the same cart.
    let cart = CartStore::open(Storage::new(dir.path()));
    assert_eq!(cart.count(), 4);
    assert_eq!(cart.total().amount, "51.96".parse().unwrap());

    // Corrupt the persisted file; the next open starts empty, no error.
    std::fs::write(Storage::new(dir.path()).path_for(CART_KEY), "][").unwrap();
    let cart = CartStore::open(Storage::new(dir.path()));
    assert!(cart.is_empty());
}

#[test]
fn session_survives_restart_until_expiry() {
    let dir = tempfile::tempdir().unwrap();

    {
        let session = SessionStore::open(Storage::new(dir.path()));
        session.login(&bearer_token("asha@example.com", &["BUYER"], 3600));
    }

    let session = SessionStore::open(Storage::new(dir.path()));
    let state = session.current();
    assert!(state.is_authenticated());
    assert_eq!(state.identity().unwrap().subject, "asha@example.com");
}

#[test]
fn expired_token_makes_restart_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    storage
        .set(TOKEN_KEY, &bearer_token("asha@example.com", &["BUYER"], -60))
        .unwrap();

    let session = SessionStore::open(storage.clone());
    assert!(!session.current().is_authenticated());
    assert!(session.current().identity().is_none());
    // The stale token was also cleared from disk.
    assert!(storage.get::<String>(TOKEN_KEY).unwrap().is_none());
}

#[test]
fn two_stores_reconcile_only_at_reopen() {
    // Two "tabs" sharing a data directory: in-memory copies diverge, and
    // whichever wrote last wins at the next open.
    let dir = tempfile::tempdir().unwrap();

    let tab_a = CartStore::open(Storage::new(dir.path()));
    let tab_b = CartStore::open(Storage::new(dir.path()));

    tab_a.add(&test_product(1, "Bamboo Toothbrush", "12.99"));
    tab_b.add(&test_product(2, "Organic Tea", "19.99"));

    // Neither tab sees the other's line.
    assert_eq!(tab_a.lines().len(), 1);
    assert_eq!(tab_b.lines().len(), 1);

    // The last write (tab B's) is what a restart observes.
    let reopened = CartStore::open(Storage::new(dir.path()));
    let ids: Vec<i64> = reopened.lines().iter().map(|l| l.product.id.as_i64()).collect();
    assert_eq!(ids, vec![2]);
}
