//! Shopping commands: catalog, cart, and the checkout wizard.

use clap::Args;

use ecobazaar_core::{Address, ProductId};
use ecobazaar_storefront::catalog::{CatalogFilter, SortOrder, filter_and_sort};
use ecobazaar_storefront::checkout::{CheckoutFlow, CheckoutRedirect, PaymentDetails};

use crate::App;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Browse the catalog with client-side filters.
pub async fn products(
    app: &App,
    search: String,
    categories: Vec<String>,
    zero_waste: bool,
    sort: SortOrder,
) -> CommandResult {
    let catalog = app.api.products().await?;
    let filter = CatalogFilter {
        search,
        categories,
        zero_waste_only: zero_waste,
    };
    let results = filter_and_sort(&catalog, &filter, sort);

    if results.is_empty() {
        println!("No products found. Try adjusting your filters.");
        return Ok(());
    }

    for product in &results {
        let badge = if product.zero_waste { "  [zero-waste]" } else { "" };
        println!(
            "#{:<5} {:<36} {:>10}  {:.2} kg CO2e  ({}){badge}",
            product.id,
            product.name,
            product.price.display(),
            product.carbon_emission,
            product.category,
        );
    }
    println!("{} product(s)", results.len());
    Ok(())
}

/// Print cart lines and derived totals.
pub fn cart_show(app: &App) -> CommandResult {
    let lines = app.cart.lines();
    if lines.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for line in &lines {
        println!(
            "#{:<5} {:<36} x{:<3} {:>10}",
            line.product.id,
            line.product.name,
            line.quantity,
            line.line_total().display(),
        );
    }
    println!(
        "{} item(s), total {}",
        app.cart.count(),
        app.cart.total().display()
    );
    Ok(())
}

/// Add one unit of a product by catalog ID.
pub async fn cart_add(app: &App, product_id: ProductId) -> CommandResult {
    let catalog = app.api.products().await?;
    let Some(product) = catalog.iter().find(|p| p.id == product_id) else {
        return Err(format!("no product #{product_id} in the catalog").into());
    };

    app.cart.add(product);
    println!("Added {} to the cart.", product.name);
    cart_show(app)
}

/// Remove a line.
pub fn cart_remove(app: &App, product_id: ProductId) -> CommandResult {
    app.cart.remove(product_id);
    cart_show(app)
}

/// Set a line's quantity exactly.
pub fn cart_set_qty(app: &App, product_id: ProductId, quantity: i32) -> CommandResult {
    app.cart.set_quantity(product_id, quantity);
    cart_show(app)
}

/// Empty the cart.
pub fn cart_clear(app: &App) -> CommandResult {
    app.cart.clear();
    println!("Cart cleared.");
    Ok(())
}

/// Everything the checkout wizard collects, as flags.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    // Shipping address
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub address1: String,
    #[arg(long)]
    pub address2: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip: String,
    #[arg(long)]
    pub country: String,

    // Payment details (collected, never transmitted)
    #[arg(long)]
    pub card_name: String,
    #[arg(long)]
    pub card_number: String,
    #[arg(long)]
    pub exp_date: String,
    #[arg(long)]
    pub cvv: String,
}

/// Drive the wizard: address → payment → review → place order.
pub async fn checkout(app: &App, args: CheckoutArgs) -> CommandResult {
    let mut flow = match CheckoutFlow::begin(&app.session.current(), &app.cart) {
        Ok(flow) => flow,
        Err(CheckoutRedirect::SignIn) => {
            println!("Please sign in to continue: eco login");
            return Ok(());
        }
        Err(CheckoutRedirect::Catalog) => {
            println!("Your cart is empty. Start shopping: eco products");
            return Ok(());
        }
    };

    flow.address = Address {
        first_name: args.first_name,
        last_name: args.last_name,
        address1: args.address1,
        address2: args.address2,
        city: args.city,
        state: args.state,
        zip: args.zip,
        country: args.country,
    };
    flow.next()?;

    flow.payment = PaymentDetails {
        card_name: args.card_name,
        card_number: args.card_number,
        exp_date: args.exp_date,
        cvv: args.cvv,
    };
    flow.next()?;

    // Review
    println!("Order summary:");
    for line in app.cart.lines() {
        println!(
            "  {} x{} - {}",
            line.product.name,
            line.quantity,
            line.line_total().display()
        );
    }
    println!("  Subtotal {} | Shipping free", app.cart.total().display());
    println!(
        "  Ship to {} {}, {}, {} {}, {}",
        flow.address.first_name,
        flow.address.last_name,
        flow.address.address1,
        flow.address.city,
        flow.address.zip,
        flow.address.country
    );
    println!("  Paying with {}", flow.payment.masked_number());

    let order = flow
        .place_order(&app.api, &app.session.current(), &app.cart)
        .await?;

    println!(
        "Thank you for your order! Order #{} ({}) is pending approval.",
        order.id,
        order.total_price.display()
    );
    Ok(())
}
