//! Session commands: login, logout, whoami, signup.

use secrecy::ExposeSecret;

use ecobazaar_core::{Email, Role};
use ecobazaar_storefront::api::types::{BuyerSignup, SellerSignup};
use ecobazaar_storefront::session::{Destination, destination_for};

use crate::App;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Sign in and persist the session.
pub async fn login(app: &App, role: Role, email: &Email, password: &str) -> CommandResult {
    let outcome = app.api.login(role, email, password).await?;

    app.session.login(outcome.token.expose_secret());
    if let Some(status) = outcome.status {
        app.session.remember_seller_status(status);
    }

    match destination_for(outcome.role, outcome.status) {
        Destination::Storefront => println!("Signed in as {email}. Happy shopping!"),
        Destination::AdminDashboard => {
            println!("Signed in as {email}. Admin console available via `eco admin`.");
        }
        Destination::SellerDashboard => {
            println!("Signed in as {email}. Seller console available via `eco seller`.");
        }
        Destination::SellerPendingApproval => {
            println!("Signed in as {email}. Your seller account is awaiting approval.");
        }
        Destination::SellerBlocked => {
            println!("Signed in as {email}. Your seller account is suspended - contact support.");
        }
    }
    Ok(())
}

/// Clear the stored session.
pub fn logout(app: &App) -> CommandResult {
    app.session.logout();
    println!("Signed out.");
    Ok(())
}

/// Show the signed-in identity.
pub fn whoami(app: &App) -> CommandResult {
    let state = app.session.current();
    match state.identity() {
        Some(identity) => {
            println!("{}", identity.subject);
            println!("roles: {}", identity.roles.join(", "));
            if let Some(status) = app.session.seller_status() {
                println!("seller status: {status}");
            }
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Register a buyer account.
pub async fn signup_buyer(
    app: &App,
    name: String,
    email: Email,
    password: String,
) -> CommandResult {
    app.api
        .signup_buyer(&BuyerSignup {
            username: name,
            email,
            password,
        })
        .await?;
    println!("Signup successful! Sign in with `eco login`.");
    Ok(())
}

/// Register a seller account.
pub async fn signup_seller(
    app: &App,
    name: String,
    email: Email,
    password: String,
    business_name: String,
    gst_number: String,
) -> CommandResult {
    app.api
        .signup_seller(&SellerSignup {
            username: name,
            email,
            password,
            business_name,
            gst_number,
        })
        .await?;
    println!("Signup successful! Your seller account is pending admin approval.");
    Ok(())
}
