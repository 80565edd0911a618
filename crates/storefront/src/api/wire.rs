//! Raw wire shapes for backend JSON.
//!
//! These structs exist to make deserialization strict at the network
//! boundary: a response that does not match the documented shape is rejected
//! with a decode error instead of flowing through the app half-formed.
//! Conversion into the domain types happens in `conversions.rs`.

use chrono::NaiveDateTime;
use ecobazaar_core::{AccountStatus, Address, OrderStatus, Role};
use serde::Deserialize;

/// `POST /auth/login/{user|seller|admin}` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginWire {
    pub token: String,
    pub role: Role,
    /// Seller approval state; absent for buyers and admins.
    #[serde(default)]
    pub status: Option<AccountStatus>,
}

/// Seller object embedded in a catalog product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SellerWire {
    pub seller_id: i64,
    pub name: String,
    pub email: String,
    pub business_name: String,
}

/// `GET /api/products` element.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductWire {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stock: i32,
    pub category: String,
    #[serde(default)]
    pub image_path: Option<String>,
    pub carbon_emission: f64,
    pub price: f64,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_zero_waste_product: bool,
    pub seller: SellerWire,
}

/// Order line inside an order response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemWire {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

/// `POST /api/orders` and `GET /api/orders/my-orders` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderWire {
    pub order_id: i64,
    pub buyer_name: String,
    pub shipping_address: Address,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub order_items: Vec<OrderItemWire>,
}

/// Error body the backend attaches to non-2xx responses.
///
/// Some endpoints use `message`, some `error`; accept either.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBodyWire {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBodyWire {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}
