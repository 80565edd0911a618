//! Wire types for the admin console endpoints.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use ecobazaar_core::{AccountStatus, ProductId, Role, SellerId, UserId};
use serde::Deserialize;

/// `GET /api/admin/overview` response: platform-wide KPIs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    // User KPIs
    pub total_users: u64,
    pub user_growth_percentage: f64,

    // Order KPIs
    #[serde(rename = "totalOrdersLast30Days")]
    pub total_orders_last_30_days: u64,
    pub order_growth_percentage: f64,

    // Carbon KPIs
    #[serde(rename = "totalFootprintLast30Days")]
    pub total_footprint_last_30_days: f64,
    pub footprint_growth_percentage: f64,

    // Product KPIs
    pub total_products: u64,
    pub products_by_category: HashMap<String, u64>,
    pub eco_friendly_product_percentage: f64,
}

/// A registered account, as listed on the user management page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

/// A seller account, as listed on the seller management page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerAccount {
    pub seller_id: SellerId,
    pub email: String,
    pub business_name: String,
    pub registration_date: NaiveDateTime,
    pub status: AccountStatus,
}

/// A product in the admin catalogue view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueProduct {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub carbon_emission: f64,
    /// Which seller the product belongs to.
    pub seller_business_name: String,
}

/// One row of the seller footprint leaderboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerLeaderboardEntry {
    pub seller_name: String,
    pub average_footprint: f64,
    pub total_inventory_footprint: f64,
    pub product_count: u64,
}

/// `GET /api/admin/stats/carbon-report` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceCarbonReport {
    pub total_marketplace_footprint: f64,
    pub platform_average_footprint: f64,
    pub low_impact_product_count: u64,
    pub seller_leaderboard: Vec<SellerLeaderboardEntry>,
    /// Category name → summed footprint.
    pub footprint_by_category: HashMap<String, f64>,
}
