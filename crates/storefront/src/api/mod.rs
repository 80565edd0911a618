//! Typed client for the EcoBazaar REST backend.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`; protected endpoints carry
//!   `Authorization: Bearer <token>`
//! - Responses are deserialized into strict wire shapes (`wire.rs`) and
//!   converted to domain types (`types.rs`) at the boundary
//! - The product catalog is cached in-memory via `moka` (5 minute TTL)
//! - Requests are single-shot: no retries, no client-side timeouts beyond
//!   the ambient network stack's defaults
//!
//! # Example
//!
//! ```rust,ignore
//! use ecobazaar_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config);
//! let outcome = client.login(Role::Buyer, &email, "password").await?;
//! let products = client.products().await?;
//! ```

mod conversions;
pub mod types;
mod wire;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use ecobazaar_core::{Email, OrderId, Role};

use crate::checkout::OrderGateway;
use crate::config::StorefrontConfig;
use conversions::{convert_login, convert_order, convert_product};
use wire::{ErrorBodyWire, LoginWire, OrderWire, ProductWire};

/// Catalog cache time-to-live.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key for the product catalog.
const CATALOG_CACHE_KEY: &str = "products";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself failed (connection refused, DNS, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body did not match the documented shape.
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint path did not resolve against the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// True for 401 responses, which mean the stored token is no longer
    /// accepted and the user should sign in again.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == reqwest::StatusCode::UNAUTHORIZED)
    }
}

/// Client for the EcoBazaar REST API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the catalog
/// cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    catalog_cache: Cache<String, Vec<Product>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    /// Create a client for an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
                catalog_cache,
            }),
        }
    }

    /// The backend base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Turn a response into `T`, mapping non-success statuses to
    /// [`ApiError::Status`] with the backend's `message`/`error` body field
    /// when one is present.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = Self::read_success_text(response).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            ApiError::Decode(e)
        })
    }

    /// Like [`Self::read_json`] but discards the body of successful
    /// responses; for endpoints whose body the client has no use for.
    async fn read_success(response: reqwest::Response) -> Result<(), ApiError> {
        Self::read_success_text(response).await.map(|_| ())
    }

    async fn read_success_text(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        let message = serde_json::from_str::<ErrorBodyWire>(&text)
            .ok()
            .and_then(ErrorBodyWire::into_message)
            .unwrap_or_else(|| text.chars().take(200).collect());
        tracing::error!(status = %status, message = %message, "backend returned non-success status");
        Err(ApiError::Status { status, message })
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Log in as `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are
    /// rejected.
    #[instrument(skip(self, password), fields(role = %role))]
    pub async fn login(
        &self,
        role: Role,
        email: &Email,
        password: &str,
    ) -> Result<LoginOutcome, ApiError> {
        let url = self.endpoint(&format!("auth/login/{}", role.auth_segment()))?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let wire: LoginWire = Self::read_json(response).await?;
        Ok(convert_login(wire))
    }

    /// Register a buyer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// registration (e.g. duplicate email).
    #[instrument(skip(self, signup))]
    pub async fn signup_buyer(&self, signup: &BuyerSignup) -> Result<(), ApiError> {
        let url = self.endpoint("auth/signup/user")?;
        let response = self.inner.client.post(url).json(signup).send().await?;
        Self::read_success(response).await
    }

    /// Register a seller account. New sellers start pending admin approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// registration.
    #[instrument(skip(self, signup))]
    pub async fn signup_seller(&self, signup: &SellerSignup) -> Result<(), ApiError> {
        let url = self.endpoint("auth/signup/seller")?;
        let response = self.inner.client.post(url).json(signup).send().await?;
        Self::read_success(response).await
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get the product catalog (cached for 5 minutes).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(products) = self
            .inner
            .catalog_cache
            .get(CATALOG_CACHE_KEY)
            .await
        {
            debug!("cache hit for product catalog");
            return Ok(products);
        }

        let url = self.endpoint("api/products")?;
        let response = self.inner.client.get(url).send().await?;
        let wires: Vec<ProductWire> = Self::read_json(response).await?;
        let products: Vec<Product> = wires.into_iter().map(convert_product).collect();

        self.inner
            .catalog_cache
            .insert(CATALOG_CACHE_KEY.to_string(), products.clone())
            .await;

        Ok(products)
    }

    /// Drop the cached catalog so the next `products()` call refetches.
    pub async fn invalidate_products(&self) {
        self.inner
            .catalog_cache
            .invalidate(CATALOG_CACHE_KEY)
            .await;
    }

    /// Absolute URL for a product image, given the backend-stored path.
    ///
    /// The backend stores paths written on the server's filesystem, so the
    /// final segment is extracted tolerating both separators.
    #[must_use]
    pub fn image_url(&self, image_path: &str) -> String {
        let file = image_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(image_path);
        format!("{}uploads/{file}", self.inner.base_url)
    }

    // =========================================================================
    // Order Methods (not cached - mutable state)
    // =========================================================================

    /// Place an order for the signed-in buyer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// order; the caller's local state must be left unchanged in that case.
    #[instrument(skip(self, token, request))]
    pub async fn place_order(
        &self,
        token: &SecretString,
        request: &OrderRequest,
    ) -> Result<Order, ApiError> {
        let url = self.endpoint("api/orders")?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(request)
            .send()
            .await?;

        let wire: OrderWire = Self::read_json(response).await?;
        Ok(convert_order(wire))
    }

    /// The signed-in buyer's order history, newest first as the backend
    /// returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn my_orders(&self, token: &SecretString) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint("api/orders/my-orders")?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let wires: Vec<OrderWire> = Self::read_json(response).await?;
        Ok(wires.into_iter().map(convert_order).collect())
    }

    /// Cancel an order. The backend only allows this while the order is
    /// still pending approval or approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order is no longer
    /// cancellable.
    #[instrument(skip(self, token), fields(order_id = %order_id))]
    pub async fn cancel_order(
        &self,
        token: &SecretString,
        order_id: OrderId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/orders/{order_id}/cancel"))?;
        let response = self
            .inner
            .client
            .patch(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        Self::read_success(response).await
    }
}

impl OrderGateway for ApiClient {
    async fn submit_order(
        &self,
        token: &SecretString,
        request: &OrderRequest,
    ) -> Result<Order, ApiError> {
        self.place_order(token, request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:8081".parse().unwrap())
    }

    #[test]
    fn test_endpoint_joins_against_base() {
        let url = client().endpoint("api/products").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/api/products");
    }

    #[test]
    fn test_image_url_strips_server_side_paths() {
        let client = client();
        assert_eq!(
            client.image_url("uploads\\images\\brush.jpg"),
            "http://localhost:8081/uploads/brush.jpg"
        );
        assert_eq!(
            client.image_url("/var/data/uploads/brush.jpg"),
            "http://localhost:8081/uploads/brush.jpg"
        );
        assert_eq!(
            client.image_url("brush.jpg"),
            "http://localhost:8081/uploads/brush.jpg"
        );
    }

    #[test]
    fn test_debug_omits_internals() {
        let output = format!("{:?}", client());
        assert!(output.contains("http://localhost:8081"));
    }
}
