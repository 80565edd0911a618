//! EcoBazaar Core - Shared types library.
//!
//! This crate provides common types used across all EcoBazaar client
//! components:
//! - `storefront` - Buyer-side shopping flow (session, cart, checkout)
//! - `console` - Seller and admin management clients
//! - `cli` - The `eco` command-line binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   addresses, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
