//! EcoBazaar Storefront - buyer-side client library.
//!
//! Everything a buyer-facing frontend needs to talk to the EcoBazaar
//! backend: the session store (bearer token + decoded identity), the cart
//! store (persisted, with derived totals), the checkout wizard, client-side
//! catalog filtering, and the typed REST API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - Durable per-user state (token, cart, seller status) lives in a small
//!   file-backed store under the data directory
//! - Stores publish snapshots on `tokio::sync::watch` channels so views can
//!   observe changes without holding references into the store
//!
//! # Example
//!
//! ```rust,ignore
//! use ecobazaar_storefront::{api::ApiClient, cart::CartStore, config::StorefrontConfig};
//!
//! let config = StorefrontConfig::from_env()?;
//! let client = ApiClient::new(&config);
//! let cart = CartStore::open(Storage::new(&config.data_dir));
//!
//! let products = client.products().await?;
//! if let Some(product) = products.first() {
//!     cart.add(product);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use error::{Result, StorefrontError};
