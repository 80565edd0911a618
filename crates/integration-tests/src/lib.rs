//! Shared helpers for EcoBazaar integration tests.
//!
//! These tests exercise the buyer flow end to end against in-process stubs:
//! no backend is required, which keeps them runnable in CI.

#![cfg_attr(not(test), forbid(unsafe_code))]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::NaiveDateTime;

use ecobazaar_core::{CurrencyCode, Price, ProductId, SellerId};
use ecobazaar_storefront::api::types::{Product, SellerSummary};

/// A catalog product snapshot for tests.
///
/// # Panics
///
/// Panics if `price` is not a valid decimal literal.
#[must_use]
pub fn test_product(id: i64, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} (test)"),
        stock: 25,
        category: "Groceries".into(),
        image_path: None,
        carbon_emission: 0.4,
        price: Price::new(price.parse().expect("valid decimal"), CurrencyCode::INR),
        created_at: NaiveDateTime::default(),
        zero_waste: true,
        seller: SellerSummary {
            id: SellerId::new(1),
            name: "Asha".into(),
            email: "asha@greengoods.in".into(),
            business_name: "Green Goods".into(),
        },
    }
}

/// An unsigned JWT carrying the standard backend claims.
///
/// `expires_in_secs` is relative to now; pass a negative value for an
/// already-expired token.
#[must_use]
pub fn bearer_token(subject: &str, roles: &[&str], expires_in_secs: i64) -> String {
    let exp = now_epoch_secs() + expires_in_secs;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "sub": subject, "roles": roles, "exp": exp }).to_string(),
    );
    format!("{header}.{payload}.signature")
}

/// Seconds since the unix epoch.
#[must_use]
pub fn now_epoch_secs() -> i64 {
    i64::try_from(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs()),
    )
    .unwrap_or(i64::MAX)
}
