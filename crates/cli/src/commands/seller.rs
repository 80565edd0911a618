//! Seller console commands.

use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;

use ecobazaar_console::SellerClient;
use ecobazaar_console::seller::{CarbonEstimateRequest, NewProduct};
use ecobazaar_core::{OrderId, OrderStatus};

use crate::App;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum SellerAction {
    /// Stock levels for your listings
    Inventory,
    /// Your product listings
    Products,
    /// Your best-selling products
    TopSelling {
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// List a new product
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        stock: i32,
        #[arg(long)]
        carbon_emission: f64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        zero_waste: bool,
        /// Path to a product photo
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Orders awaiting your action
    Orders,
    /// Completed and cancelled orders
    History,
    /// Move an order to a new status
    SetStatus {
        order_id: i64,
        /// Target status (`APPROVED`, `SHIPPED`, `DELIVERED`, `CANCELLED`)
        status: OrderStatus,
    },
    /// Your dashboard KPIs
    Stats,
    /// Your carbon footprint report
    CarbonReport,
    /// Estimate a product's footprint
    Estimate {
        #[arg(long)]
        material: String,
        /// Weight in grams
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        packaging: String,
    },
}

fn client(app: &App) -> Result<SellerClient, Box<dyn std::error::Error>> {
    let state = app.session.current();
    let token = state
        .token()
        .cloned()
        .ok_or("sign in first with `eco login --role SELLER`")?;
    Ok(SellerClient::new(app.config.api_base_url.clone(), token))
}

pub async fn run(app: &App, action: SellerAction) -> CommandResult {
    let client = client(app)?;

    match action {
        SellerAction::Inventory => {
            for item in client.inventory().await? {
                println!("#{:<5} {:<36} stock {}", item.id, item.name, item.stock);
            }
        }
        SellerAction::Products => {
            for product in client.my_products().await? {
                let badge = if product.is_zero_waste_product {
                    "  [zero-waste]"
                } else {
                    ""
                };
                println!(
                    "#{:<5} {:<36} ₹{:<10.2} stock {:<4} {:.2} kg CO2e{badge}",
                    product.product_id,
                    product.name,
                    product.price,
                    product.stock,
                    product.carbon_emission,
                );
            }
        }
        SellerAction::TopSelling { limit } => {
            for (rank, product) in client.top_selling(limit).await?.iter().enumerate() {
                println!(
                    "{}. {:<36} ₹{:.2} ({})",
                    rank + 1,
                    product.name,
                    product.price,
                    product.category
                );
            }
        }
        SellerAction::AddProduct {
            name,
            price,
            stock,
            carbon_emission,
            description,
            category,
            zero_waste,
            image,
        } => {
            client
                .add_product(&NewProduct {
                    name: name.clone(),
                    price,
                    stock,
                    carbon_emission,
                    description,
                    category,
                    zero_waste,
                    image,
                })
                .await?;
            println!("Listed {name}.");
        }
        SellerAction::Orders => print_orders(&client.orders().await?),
        SellerAction::History => print_orders(&client.order_history().await?),
        SellerAction::SetStatus { order_id, status } => {
            let order = client
                .update_order_status(OrderId::new(order_id), status)
                .await?;
            println!("Order #{} is now {}.", order.order_id, order.status);
        }
        SellerAction::Stats => {
            let stats = client.dashboard_stats().await?;
            println!("Revenue:           ₹{:.2}", stats.total_revenue);
            println!("Orders:            {}", stats.total_orders);
            println!("Avg order value:   ₹{:.2}", stats.average_order_value);
            println!("Carbon saved:      {:.2} kg CO2e", stats.total_carbon_saved);
            println!(
                "Products:          {} ({:.1}% eco-friendly)",
                stats.total_products, stats.eco_friendly_product_percentage
            );
        }
        SellerAction::CarbonReport => {
            let report = client.carbon_report().await?;
            println!("Report for {}", report.seller_email);
            println!("Products:              {}", report.total_products);
            println!(
                "Total emission:        {:.2} kg CO2e",
                report.total_carbon_emission
            );
            println!(
                "Average per product:   {:.2} kg CO2e",
                report.avg_carbon_emission
            );
            println!(
                "Stock-adjusted:        {:.2} kg CO2e",
                report.stock_adjusted_carbon
            );
            if let Some(product) = &report.highest_emission_product {
                println!("Highest emission:      {product}");
            }
            if let Some(product) = &report.lowest_emission_product {
                println!("Lowest emission:       {product}");
            }
            for (category, carbon) in &report.category_wise_carbon {
                println!("  {category}: {carbon:.2} kg CO2e");
            }
        }
        SellerAction::Estimate {
            material,
            weight,
            origin,
            packaging,
        } => {
            let estimate = client
                .calculate_carbon(&CarbonEstimateRequest {
                    material,
                    weight,
                    origin,
                    packaging,
                })
                .await?;
            println!("Estimated footprint: {:.2} kg CO2e", estimate.carbon_emission);
        }
    }

    Ok(())
}

fn print_orders(orders: &[ecobazaar_console::seller::SellerOrder]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    for order in orders {
        let next: Vec<String> = [
            OrderStatus::Approved,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
        .into_iter()
        .filter(|s| order.status.can_transition_to(*s))
        .map(|s| s.to_string())
        .collect();

        println!(
            "#{:<5} {} <{}>  ₹{:<10.2} {}  {}",
            order.order_id,
            order.buyer_name,
            order.buyer_email,
            order.total_price,
            order.status,
            if next.is_empty() {
                String::new()
            } else {
                format!("(next: {})", next.join("/"))
            },
        );
    }
}
