//! EcoBazaar CLI - drive the marketplace from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and browse
//! eco login -e buyer@example.com -p secret
//! eco products --search bamboo --sort price-asc
//!
//! # Build a cart and check out
//! eco cart add 14
//! eco cart show
//! eco checkout --first-name Asha --last-name Verma --address1 "12 Lake View Road" \
//!     --city Pune --state MH --zip 411001 --country India \
//!     --card-name "Asha Verma" --card-number 4242424242424242 --exp-date 12/27 --cvv 123
//!
//! # Operator consoles
//! eco seller orders
//! eco admin overview
//! ```
//!
//! # Environment Variables
//!
//! - `ECOBAZAAR_API_BASE_URL` - Backend base URL (default: `http://localhost:8081`)
//! - `ECOBAZAAR_DATA_DIR` - Directory for persisted state (default: `~/.ecobazaar`)
//! - `SENTRY_DSN` - Optional Sentry error tracking DSN
//! - `RUST_LOG` - Tracing filter (default: warnings and up)

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks to its user on stdout/stderr.
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecobazaar_core::{Email, OrderId, ProductId, Role};
use ecobazaar_storefront::api::ApiClient;
use ecobazaar_storefront::cart::CartStore;
use ecobazaar_storefront::catalog::SortOrder;
use ecobazaar_storefront::config::StorefrontConfig;
use ecobazaar_storefront::session::SessionStore;
use ecobazaar_storefront::storage::Storage;

mod commands;

use commands::{admin, auth, orders, seller, shop};

/// Everything a command needs, built once at startup.
pub struct App {
    pub config: StorefrontConfig,
    pub api: ApiClient,
    pub session: SessionStore,
    pub cart: CartStore,
}

type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "eco")]
#[command(author, version, about = "EcoBazaar marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: Email,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Account role (`BUYER`, `SELLER`, `ADMIN`)
        #[arg(short, long, default_value = "BUYER")]
        role: Role,
    },
    /// Clear the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Register a new account
    Signup {
        #[command(subcommand)]
        kind: SignupKind,
    },
    /// Browse the product catalog
    Products {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,

        /// Restrict to categories (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Only zero-waste products
        #[arg(long)]
        zero_waste: bool,

        /// Ordering (`default`, `price-asc`, `price-desc`)
        #[arg(long, default_value = "default")]
        sort: SortOrder,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Run the checkout wizard end to end
    Checkout(shop::CheckoutArgs),
    /// Buyer order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Seller console
    Seller {
        #[command(subcommand)]
        action: seller::SellerAction,
    },
    /// Admin console
    Admin {
        #[command(subcommand)]
        action: admin::AdminAction,
    },
}

#[derive(Subcommand)]
enum SignupKind {
    /// Register a buyer account
    Buyer {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: Email,
        #[arg(short, long)]
        password: String,
    },
    /// Register a seller account (pending admin approval)
    Seller {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: Email,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        business_name: String,
        #[arg(long)]
        gst_number: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show lines and totals
    Show,
    /// Add one unit of a product
    Add { product_id: i64 },
    /// Remove a line
    Remove { product_id: i64 },
    /// Set a line's quantity exactly (0 removes it)
    SetQty { product_id: i64, quantity: i32 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders
    List,
    /// Cancel an order that is still pending or approved
    Cancel { order_id: i64 },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eco=warn,ecobazaar_storefront=warn,ecobazaar_console=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let storage = Storage::new(config.data_dir.clone());
    let app = App {
        api: ApiClient::new(&config),
        session: SessionStore::open(storage.clone()),
        cart: CartStore::open(storage),
        config,
    };

    if let Err(e) = run(cli, &app).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, app: &App) -> CommandResult {
    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => auth::login(app, role, &email, &password).await,
        Commands::Logout => auth::logout(app),
        Commands::Whoami => auth::whoami(app),
        Commands::Signup { kind } => match kind {
            SignupKind::Buyer {
                name,
                email,
                password,
            } => auth::signup_buyer(app, name, email, password).await,
            SignupKind::Seller {
                name,
                email,
                password,
                business_name,
                gst_number,
            } => auth::signup_seller(app, name, email, password, business_name, gst_number).await,
        },
        Commands::Products {
            search,
            category,
            zero_waste,
            sort,
        } => shop::products(app, search, category, zero_waste, sort).await,
        Commands::Cart { action } => match action {
            CartAction::Show => shop::cart_show(app),
            CartAction::Add { product_id } => {
                shop::cart_add(app, ProductId::new(product_id)).await
            }
            CartAction::Remove { product_id } => shop::cart_remove(app, ProductId::new(product_id)),
            CartAction::SetQty {
                product_id,
                quantity,
            } => shop::cart_set_qty(app, ProductId::new(product_id), quantity),
            CartAction::Clear => shop::cart_clear(app),
        },
        Commands::Checkout(args) => shop::checkout(app, args).await,
        Commands::Orders { action } => match action {
            OrdersAction::List => orders::list(app).await,
            OrdersAction::Cancel { order_id } => orders::cancel(app, OrderId::new(order_id)).await,
        },
        Commands::Seller { action } => seller::run(app, action).await,
        Commands::Admin { action } => admin::run(app, action).await,
    }
}
