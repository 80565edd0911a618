//! Command implementations for the `eco` binary.

pub mod admin;
pub mod auth;
pub mod orders;
pub mod seller;
pub mod shop;
