//! Domain types for the EcoBazaar REST API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! shapes in `wire.rs`. Everything here is fully typed: IDs are newtypes,
//! money is decimal, statuses are enums.

use chrono::NaiveDateTime;
use ecobazaar_core::{
    AccountStatus, Address, Email, OrderId, OrderStatus, Price, ProductId, Role, SellerId,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Types
// =============================================================================

/// The seller attached to a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerSummary {
    pub id: SellerId,
    pub name: String,
    pub email: String,
    pub business_name: String,
}

/// A catalog product.
///
/// Cart lines hold a full snapshot of this type as it was at add-time, so it
/// is serializable for the durable cart store. Later catalog changes never
/// retroactively affect lines already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub stock: i32,
    pub category: String,
    /// Backend-stored image path; resolve with `ApiClient::image_url`.
    pub image_path: Option<String>,
    /// Estimated manufacturing footprint in kg CO2e.
    pub carbon_emission: f64,
    pub price: Price,
    pub created_at: NaiveDateTime,
    pub zero_waste: bool,
    pub seller: SellerSummary,
}

// =============================================================================
// Order Types
// =============================================================================

/// One line of a placed order, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: Price,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_name: String,
    pub shipping_address: Address,
    pub total_price: Price,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

/// Payload for `POST /api/orders`.
///
/// Only product IDs and quantities travel; the backend re-prices every line
/// from its own catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub shipping_address: Address,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

// =============================================================================
// Auth Types
// =============================================================================

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Bearer token to attach to protected requests.
    pub token: SecretString,
    /// Role the backend authenticated this account as.
    pub role: Role,
    /// Seller approval status; `None` for buyers and admins.
    pub status: Option<AccountStatus>,
}

/// Payload for `POST /auth/signup/user`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerSignup {
    pub username: String,
    pub email: Email,
    pub password: String,
}

/// Payload for `POST /auth/signup/seller`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerSignup {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub business_name: String,
    pub gst_number: String,
}
