//! Admin console commands.

use clap::Subcommand;

use ecobazaar_console::AdminClient;
use ecobazaar_core::{AccountStatus, ProductId, SellerId, UserId};

use crate::App;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Platform-wide KPIs
    Overview,
    /// List registered accounts
    Users,
    /// Delete an account
    DeleteUser { user_id: i64 },
    /// List seller accounts
    Sellers,
    /// Approve a pending seller
    ApproveSeller { seller_id: i64 },
    /// Suspend a seller
    SuspendSeller { seller_id: i64 },
    /// Reactivate a suspended seller
    ActivateSeller { seller_id: i64 },
    /// Delete a seller and their listings
    DeleteSeller { seller_id: i64 },
    /// The full product catalogue
    Products,
    /// Remove a product from the marketplace
    DeleteProduct { product_id: i64 },
    /// Marketplace-wide carbon report
    CarbonReport,
}

fn client(app: &App) -> Result<AdminClient, Box<dyn std::error::Error>> {
    let state = app.session.current();
    let token = state
        .token()
        .cloned()
        .ok_or("sign in first with `eco login --role ADMIN`")?;
    Ok(AdminClient::new(app.config.api_base_url.clone(), token))
}

pub async fn run(app: &App, action: AdminAction) -> CommandResult {
    let client = client(app)?;

    match action {
        AdminAction::Overview => {
            let stats = client.overview().await?;
            println!(
                "Users:     {} ({:+.1}%)",
                stats.total_users, stats.user_growth_percentage
            );
            println!(
                "Orders:    {} in the last 30 days ({:+.1}%)",
                stats.total_orders_last_30_days, stats.order_growth_percentage
            );
            println!(
                "Footprint: {:.2} kg CO2e in the last 30 days ({:+.1}%)",
                stats.total_footprint_last_30_days, stats.footprint_growth_percentage
            );
            println!(
                "Products:  {} ({:.1}% eco-friendly)",
                stats.total_products, stats.eco_friendly_product_percentage
            );
            for (category, count) in &stats.products_by_category {
                println!("  {category}: {count}");
            }
        }
        AdminAction::Users => {
            for user in client.users().await? {
                println!(
                    "#{:<5} {:<24} <{}>  {}  since {}",
                    user.user_id,
                    user.username,
                    user.email,
                    user.role,
                    user.created_at.format("%Y-%m-%d")
                );
            }
        }
        AdminAction::DeleteUser { user_id } => {
            client.delete_user(UserId::new(user_id)).await?;
            println!("User #{user_id} deleted.");
        }
        AdminAction::Sellers => {
            for seller in client.sellers().await? {
                println!(
                    "#{:<5} {:<28} <{}>  {}  since {}",
                    seller.seller_id,
                    seller.business_name,
                    seller.email,
                    seller.status,
                    seller.registration_date.format("%Y-%m-%d")
                );
            }
        }
        AdminAction::ApproveSeller { seller_id } => {
            set_seller_status(&client, seller_id, AccountStatus::Active).await?;
        }
        AdminAction::SuspendSeller { seller_id } => {
            set_seller_status(&client, seller_id, AccountStatus::Suspended).await?;
        }
        AdminAction::ActivateSeller { seller_id } => {
            set_seller_status(&client, seller_id, AccountStatus::Active).await?;
        }
        AdminAction::DeleteSeller { seller_id } => {
            client.delete_seller(SellerId::new(seller_id)).await?;
            println!("Seller #{seller_id} deleted.");
        }
        AdminAction::Products => {
            for product in client.products().await? {
                println!(
                    "#{:<5} {:<36} ₹{:<10.2} stock {:<4} {:.2} kg CO2e  ({})",
                    product.id,
                    product.name,
                    product.price,
                    product.stock,
                    product.carbon_emission,
                    product.seller_business_name,
                );
            }
        }
        AdminAction::DeleteProduct { product_id } => {
            client.delete_product(ProductId::new(product_id)).await?;
            println!("Product #{product_id} deleted.");
        }
        AdminAction::CarbonReport => {
            let report = client.carbon_report().await?;
            println!(
                "Marketplace footprint: {:.2} kg CO2e",
                report.total_marketplace_footprint
            );
            println!(
                "Platform average:      {:.2} kg CO2e",
                report.platform_average_footprint
            );
            println!(
                "Low-impact products:   {}",
                report.low_impact_product_count
            );
            println!("Seller leaderboard:");
            for entry in &report.seller_leaderboard {
                println!(
                    "  {:<28} avg {:.2} | inventory {:.2} | {} product(s)",
                    entry.seller_name,
                    entry.average_footprint,
                    entry.total_inventory_footprint,
                    entry.product_count
                );
            }
            println!("Footprint by category:");
            for (category, carbon) in &report.footprint_by_category {
                println!("  {category}: {carbon:.2} kg CO2e");
            }
        }
    }

    Ok(())
}

async fn set_seller_status(
    client: &AdminClient,
    seller_id: i64,
    status: AccountStatus,
) -> CommandResult {
    client
        .set_seller_status(SellerId::new(seller_id), status)
        .await?;
    println!("Seller #{seller_id} is now {status}.");
    Ok(())
}
