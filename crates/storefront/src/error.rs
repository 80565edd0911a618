//! Unified error type for embedders of this crate.
//!
//! The individual subsystems keep their own error enums; this type exists
//! so a frontend (the CLI, a GUI shell) can hold one error in one place.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The checkout wizard rejected an action.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for [`StorefrontError`].
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_source() {
        let err = StorefrontError::Checkout(CheckoutError::NotAtReview);
        assert_eq!(
            err.to_string(),
            "checkout error: orders can only be placed from the review step"
        );
    }
}
