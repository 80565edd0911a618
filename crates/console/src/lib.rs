//! EcoBazaar Console - seller and admin management clients.
//!
//! The operator-facing half of the client: typed access to the seller
//! dashboard endpoints (inventory, product management, incoming orders,
//! carbon reporting) and the admin endpoints (platform overview, user and
//! seller management, marketplace carbon report).
//!
//! Both clients consume the same REST boundary as the storefront and carry
//! the bearer token obtained at login. They hold the token for their
//! lifetime: a console is opened for one operator session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod error;
pub mod seller;

pub use admin::AdminClient;
pub use error::ConsoleError;
pub use seller::SellerClient;
