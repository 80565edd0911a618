//! Seller console client.
//!
//! Covers the seller dashboard surface: inventory, product listing and
//! creation, incoming orders with status transitions, and carbon reporting.

pub mod types;

pub use types::*;

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use ecobazaar_core::{OrderId, OrderStatus};

use crate::error::{ConsoleError, read_json, read_success};

/// Client for the seller console endpoints.
///
/// Holds the bearer token for the operator session it was opened with.
#[derive(Clone)]
pub struct SellerClient {
    client: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl std::fmt::Debug for SellerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SellerClient {
    /// Create a client for `base_url` using the token from a seller login.
    #[must_use]
    pub fn new(base_url: Url, token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ConsoleError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ConsoleError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        read_json(response).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Stock levels for every product this seller lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn inventory(&self) -> Result<Vec<InventoryItem>, ConsoleError> {
        self.get_json("seller/inventory").await
    }

    /// The seller's own product listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_products(&self) -> Result<Vec<SellerProduct>, ConsoleError> {
        self.get_json("seller/product/my-products").await
    }

    /// The seller's best-selling products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn top_selling(&self, limit: u32) -> Result<Vec<TopProduct>, ConsoleError> {
        self.get_json(&format!("seller/product/top-selling?limit={limit}"))
            .await
    }

    /// List a new product, optionally uploading a photo.
    ///
    /// The backend takes this as a multipart form; the photo travels as a
    /// file part named `image`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read, the request fails, or
    /// the backend rejects the listing.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: &NewProduct) -> Result<(), ConsoleError> {
        let mut form = Form::new()
            .text("name", product.name.clone())
            .text("price", product.price.to_string())
            .text("stock", product.stock.to_string())
            .text("carbonEmission", product.carbon_emission.to_string())
            .text("description", product.description.clone())
            .text("category", product.category.clone())
            .text("isZeroWasteProduct", product.zero_waste.to_string());

        if let Some(path) = &product.image {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ConsoleError::File {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        }

        let url = self.endpoint("seller/product/add")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .multipart(form)
            .send()
            .await?;
        read_success(response).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Orders currently awaiting this seller's action.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<SellerOrder>, ConsoleError> {
        self.get_json("api/seller/orders").await
    }

    /// Completed and cancelled orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn order_history(&self) -> Result<Vec<SellerOrder>, ConsoleError> {
        self.get_json("api/seller/orders/history").await
    }

    /// Move an order to `new_status`.
    ///
    /// The backend enforces the order state machine
    /// ([`OrderStatus::can_transition_to`]) and rejects illegal moves; UIs
    /// should use the same predicate to grey out actions beforehand.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the transition is illegal.
    #[instrument(skip(self), fields(order_id = %order_id, new_status = %new_status))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<SellerOrder, ConsoleError> {
        let url = self.endpoint(&format!("api/seller/orders/{order_id}/status"))?;
        let response = self
            .client
            .patch(url)
            .bearer_auth(self.token.expose_secret())
            .json(&serde_json::json!({ "newStatus": new_status }))
            .send()
            .await?;
        read_json(response).await
    }

    // =========================================================================
    // Stats & Carbon
    // =========================================================================

    /// The seller dashboard KPI block.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ConsoleError> {
        self.get_json("api/seller/stats/dashboard").await
    }

    /// The seller's carbon footprint report.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn carbon_report(&self) -> Result<CarbonReport, ConsoleError> {
        self.get_json("seller/report/carbon-insight").await
    }

    /// Estimate the footprint of a prospective product from its material,
    /// weight, origin, and packaging.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request))]
    pub async fn calculate_carbon(
        &self,
        request: &CarbonEstimateRequest,
    ) -> Result<CarbonEstimate, ConsoleError> {
        let url = self.endpoint("api/carbon/calculate")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> SellerClient {
        SellerClient::new(
            "http://localhost:8081".parse().unwrap(),
            SecretString::from("token"),
        )
    }

    #[test]
    fn test_endpoint_joins_against_base() {
        let url = client().endpoint("seller/inventory").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/seller/inventory");
    }

    #[test]
    fn test_debug_redacts_token() {
        let output = format!("{:?}", client());
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn test_status_update_body_shape() {
        let body = serde_json::json!({ "newStatus": OrderStatus::Shipped });
        assert_eq!(body.to_string(), r#"{"newStatus":"SHIPPED"}"#);
    }
}
