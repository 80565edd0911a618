//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ECOBAZAAR_API_BASE_URL` - Backend base URL (default: `http://localhost:8081`)
//! - `ECOBAZAAR_DATA_DIR` - Directory for persisted client state
//!   (default: `~/.ecobazaar`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend base URL for local development.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the EcoBazaar REST backend.
    pub api_base_url: Url,
    /// Directory holding persisted client state (token, cart).
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("ECOBAZAAR_API_BASE_URL", DEFAULT_API_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ECOBAZAAR_API_BASE_URL".to_string(), e.to_string())
            })?;

        let data_dir = get_optional_env("ECOBAZAAR_DATA_DIR")
            .map_or_else(default_data_dir, PathBuf::from);

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            api_base_url,
            data_dir,
            sentry_dsn,
        })
    }
}

/// The per-user data directory when `ECOBAZAAR_DATA_DIR` is not set.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ecobazaar")
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
