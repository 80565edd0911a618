//! Wire types for the seller console endpoints.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use ecobazaar_core::{Address, OrderId, OrderStatus, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /seller/inventory` element: the stock view of one product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ProductId,
    pub name: String,
    pub stock: i32,
}

/// A product as listed on the seller's own catalog pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProduct {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stock: i32,
    pub category: String,
    #[serde(default)]
    pub image_path: Option<String>,
    pub carbon_emission: f64,
    pub price: f64,
    #[serde(default)]
    pub is_zero_waste_product: bool,
}

/// `GET /seller/product/top-selling` element.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// A new product to list, posted as a multipart form.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    /// Estimated manufacturing footprint in kg CO2e; sellers usually get
    /// this from [`SellerClient::calculate_carbon`](crate::SellerClient::calculate_carbon).
    pub carbon_emission: f64,
    pub description: String,
    pub category: String,
    pub zero_waste: bool,
    /// Optional product photo uploaded alongside the fields.
    pub image: Option<PathBuf>,
}

/// One line of an incoming order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

/// An order as seen from the seller console.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerOrder {
    pub order_id: OrderId,
    pub buyer_name: String,
    pub buyer_email: String,
    pub shipping_address: Address,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub order_items: Vec<SellerOrderItem>,
}

/// `GET /api/seller/stats/dashboard` response: the seller's KPI block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub average_order_value: f64,
    pub total_carbon_saved: f64,
    pub products_by_category: HashMap<String, u64>,
    pub total_products: u64,
    pub eco_friendly_product_percentage: f64,
}

/// `GET /seller/report/carbon-insight` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonReport {
    pub seller_email: String,
    pub total_products: u32,
    pub total_carbon_emission: f64,
    pub avg_carbon_emission: f64,
    #[serde(default)]
    pub highest_emission_product: Option<String>,
    #[serde(default)]
    pub lowest_emission_product: Option<String>,
    /// Category name → summed emission.
    pub category_wise_carbon: HashMap<String, f64>,
    /// Emission weighted by current stock.
    pub stock_adjusted_carbon: f64,
}

/// Inputs to the footprint calculator.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEstimateRequest {
    pub material: String,
    /// Product weight in grams.
    pub weight: f64,
    pub origin: String,
    pub packaging: String,
}

/// `POST /api/carbon/calculate` response.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEstimate {
    /// Estimated footprint in kg CO2e.
    pub carbon_emission: f64,
}
