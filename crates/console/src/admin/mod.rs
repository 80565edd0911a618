//! Admin console client.
//!
//! Platform-wide management: overview KPIs, user and seller administration,
//! the full product catalogue, and the marketplace carbon report.

pub mod types;

pub use types::*;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use ecobazaar_core::{AccountStatus, ProductId, SellerId, UserId};

use crate::error::{ConsoleError, read_json, read_success};

/// Client for the admin console endpoints.
///
/// Holds the bearer token for the operator session it was opened with.
#[derive(Clone)]
pub struct AdminClient {
    client: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Create a client for `base_url` using the token from an admin login.
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

    async fn delete(&self, path: &str) -> Result<(), ConsoleError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .delete(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        read_success(response).await
    }

    /// Platform-wide KPI block for the admin home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<OverviewStats, ConsoleError> {
        self.get_json("api/admin/overview").await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// All registered accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<ManagedUser>, ConsoleError> {
        self.get_json("api/admin/users").await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_user(&self, user_id: UserId) -> Result<(), ConsoleError> {
        self.delete(&format!("api/admin/users/{user_id}")).await
    }

    // =========================================================================
    // Sellers
    // =========================================================================

    /// All seller accounts with their approval status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn sellers(&self) -> Result<Vec<SellerAccount>, ConsoleError> {
        self.get_json("api/admin/sellers").await
    }

    /// Approve, suspend, or reactivate a seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// change.
    #[instrument(skip(self), fields(seller_id = %seller_id, new_status = %new_status))]
    pub async fn set_seller_status(
        &self,
        seller_id: SellerId,
        new_status: AccountStatus,
    ) -> Result<(), ConsoleError> {
        let url = self.endpoint(&format!("api/admin/sellers/{seller_id}/status"))?;
        let response = self
            .client
            .put(url)
            .bearer_auth(self.token.expose_secret())
            .json(&serde_json::json!({ "newStatus": new_status }))
            .send()
            .await?;
        read_success(response).await
    }

    /// Delete a seller account and its listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(seller_id = %seller_id))]
    pub async fn delete_seller(&self, seller_id: SellerId) -> Result<(), ConsoleError> {
        self.delete(&format!("api/admin/sellers/{seller_id}")).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// The full marketplace product catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<CatalogueProduct>, ConsoleError> {
        self.get_json("api/admin/products").await
    }

    /// Remove a product from the marketplace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ConsoleError> {
        self.delete(&format!("api/admin/products/{product_id}"))
            .await
    }

    // =========================================================================
    // Carbon
    // =========================================================================

    /// The marketplace-wide carbon report.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn carbon_report(&self) -> Result<MarketplaceCarbonReport, ConsoleError> {
        self.get_json("api/admin/stats/carbon-report").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> AdminClient {
        AdminClient::new(
            "http://localhost:8081".parse().unwrap(),
            SecretString::from("token"),
        )
    }

    #[test]
    fn test_endpoint_joins_against_base() {
        let url = client().endpoint("api/admin/overview").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/api/admin/overview");
    }

    #[test]
    fn test_debug_redacts_token() {
        let output = format!("{:?}", client());
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn test_status_update_body_shape() {
        let body = serde_json::json!({ "newStatus": AccountStatus::Active });
        assert_eq!(body.to_string(), r#"{"newStatus":"ACTIVE"}"#);
    }
}
