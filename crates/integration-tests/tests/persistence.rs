//! User-data persistence across simulated application restarts.
//!
//! Account state (authentication, profile, wishlist, orders) survives a
//! restart through the JSON blob; the cart deliberately does not.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use luxe_core::ProductId;
use luxe_integration_tests::{TestStorefront, product};
use luxe_storefront::auth;
use luxe_storefront::checkout::CheckoutFlow;
use luxe_storefront::models::{PaymentCard, ProfileUpdate, ShippingDetails};

async fn log_in(shop: &TestStorefront) {
    let profile = auth::login("demo@luxury.com", "demo123", Duration::ZERO)
        .await
        .unwrap();
    shop.state.account().login_with_profile(profile);
}

// =============================================================================
// Rehydration
// =============================================================================

#[tokio::test]
async fn test_session_state_survives_restart() {
    let shop = TestStorefront::new();
    log_in(&shop).await;
    shop.state.account().add_to_wishlist(&product(3, 7999));
    shop.state.account().update_profile(ProfileUpdate {
        phone: Some("+1 (555) 000-1111".to_string()),
        ..ProfileUpdate::default()
    });

    shop.state.cart().add(&product(1, 1000));
    let mut flow = CheckoutFlow::new();
    flow.submit_shipping(ShippingDetails::default()).unwrap();
    {
        let mut cart = shop.state.cart();
        let mut account = shop.state.account();
        flow.complete_payment(
            PaymentCard {
                card_number: "4242424242424242".to_string(),
                expiry: "12/28".to_string(),
                name_on_card: "Alexandra Sterling".to_string(),
            },
            &mut cart,
            &mut account,
        )
        .unwrap();
    }

    let shop = shop.reopen();
    let account = shop.state.account();
    assert!(account.is_authenticated());
    assert_eq!(account.user().unwrap().phone, "+1 (555) 000-1111");
    assert!(account.is_in_wishlist(ProductId::new(3)));
    assert_eq!(account.orders().len(), 1);
}

#[test]
fn test_cart_does_not_survive_restart() {
    let shop = TestStorefront::new();
    shop.state.cart().add(&product(1, 1000));
    shop.state.cart().add(&product(2, 500));

    let shop = shop.reopen();
    assert!(shop.state.cart().is_empty());
}

#[test]
fn test_guest_wishlist_is_persisted_too() {
    // Any account change writes the blob, authenticated or not
    let shop = TestStorefront::new();
    shop.state.account().add_to_wishlist(&product(9, 250));

    let shop = shop.reopen();
    let account = shop.state.account();
    assert!(!account.is_authenticated());
    assert!(account.is_in_wishlist(ProductId::new(9)));
}

// =============================================================================
// Purge and Corruption
// =============================================================================

#[tokio::test]
async fn test_logout_purges_the_blob() {
    let shop = TestStorefront::new();
    log_in(&shop).await;
    assert!(shop.blob_path().is_file());

    shop.state.account().logout();
    assert!(!shop.blob_path().exists());

    let shop = shop.reopen();
    assert!(!shop.state.account().is_authenticated());
    assert!(shop.state.account().user().is_none());
}

#[tokio::test]
async fn test_malformed_blob_falls_back_to_defaults() {
    let shop = TestStorefront::new();
    log_in(&shop).await;

    std::fs::write(shop.blob_path(), b"{ not json").unwrap();

    let shop = shop.reopen();
    let account = shop.state.account();
    assert!(!account.is_authenticated());
    assert!(account.wishlist().is_empty());
    assert!(account.orders().is_empty());
}

#[test]
fn test_blob_is_wire_compatible_json() {
    let shop = TestStorefront::new();
    shop.state.account().add_to_wishlist(&product(5, 199));

    let raw = std::fs::read_to_string(shop.blob_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["isAuthenticated"], serde_json::json!(false));
    assert_eq!(value["wishlist"][0]["id"], serde_json::json!(5));
}
