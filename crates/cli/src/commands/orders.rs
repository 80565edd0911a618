//! Buyer order history commands.

use ecobazaar_core::OrderId;

use crate::App;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// List the signed-in buyer's orders.
pub async fn list(app: &App) -> CommandResult {
    let state = app.session.current();
    let token = state
        .token()
        .ok_or("sign in first with `eco login`")?;

    let orders = app.api.my_orders(token).await?;
    if orders.is_empty() {
        println!("You haven't placed any orders yet.");
        return Ok(());
    }

    for order in &orders {
        println!(
            "#{:<5} {}  {:>10}  {}  ({} item(s)){}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.total_price.display(),
            order.status,
            order.items.len(),
            if order.status.buyer_cancellable() {
                "  [cancellable]"
            } else {
                ""
            },
        );
    }
    Ok(())
}

/// Cancel an order that is still pending or approved.
pub async fn cancel(app: &App, order_id: OrderId) -> CommandResult {
    let state = app.session.current();
    let token = state
        .token()
        .ok_or("sign in first with `eco login`")?;

    app.api.cancel_order(token, order_id).await?;
    println!("Order #{order_id} cancelled.");
    Ok(())
}
