//! Billing API client configuration and HTTP operations

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use chargeview_shared::{Charge, CreatedCharge};

use crate::error::{BillingError, BillingResult};

/// Timeout for billing requests (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the billing API
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Base URL of the billing service
    pub api_base_url: String,
    /// Whether charges are created in test mode
    pub test_mode: bool,
}

impl BillingConfig {
    /// Create config from environment variables
    pub fn from_env() -> BillingResult<Self> {
        Ok(Self {
            api_base_url: std::env::var("BILLING_API_URL")
                .map_err(|_| BillingError::Config("BILLING_API_URL not set".to_string()))?,
            test_mode: std::env::var("DIRECT_CHARGE_TEST")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        })
    }
}

/// Envelope for the charge list endpoint
#[derive(Debug, Deserialize)]
struct ChargeList {
    result: Vec<Charge>,
}

/// Stateless client for the billing service
///
/// Each call authenticates with the bearer token it is handed; the client
/// itself holds no session state.
#[derive(Clone)]
pub struct BillingClient {
    http: Client,
    config: BillingConfig,
}

impl BillingClient {
    /// Create a new billing client from config
    #[allow(clippy::expect_used)] // HTTP client creation failure is a fatal system error
    pub fn new(config: BillingConfig) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { http, config }
    }

    /// Create a new billing client from environment variables
    pub fn from_env() -> BillingResult<Self> {
        let config = BillingConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Get the config
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Create a direct charge
    ///
    /// The buyer authorizes the payment on the returned `confirmation_url`
    /// and is sent back to `return_url` afterwards.
    pub async fn create_charge(
        &self,
        token: &str,
        return_url: &str,
        name: &str,
        price: u32,
        quantity: u32,
    ) -> BillingResult<CreatedCharge> {
        let path = "/v1/direct_charge".to_string();
        let test = if self.config.test_mode { "1" } else { "0" };
        let price = price.to_string();
        let quantity = quantity.to_string();

        let response = self
            .http
            .post(format!("{}{}", self.config.api_base_url, path))
            .bearer_auth(token)
            .form(&[
                ("return_url", return_url),
                ("name", name),
                ("price", price.as_str()),
                ("quantity", quantity.as_str()),
                ("test", test),
            ])
            .send()
            .await?;

        self.expect_json("POST", path, StatusCode::CREATED, response)
            .await
    }

    /// Activate a charge after the buyer returns from the confirmation page
    pub async fn confirm_charge(&self, token: &str, charge_id: &str) -> BillingResult<Charge> {
        let path = format!("/v1/direct_charge/{}/activate", charge_id);

        let response = self
            .http
            .put(format!("{}{}", self.config.api_base_url, path))
            .bearer_auth(token)
            .send()
            .await?;

        self.expect_json("PUT", path, StatusCode::OK, response).await
    }

    /// List charges, most recent first (ordering is decided by the server)
    pub async fn fetch_charges(&self, token: &str) -> BillingResult<Vec<Charge>> {
        let path = "/v1/direct_charge".to_string();

        let response = self
            .http
            .get(format!("{}{}", self.config.api_base_url, path))
            .query(&[("sort", "desc")])
            .bearer_auth(token)
            .send()
            .await?;

        let list: ChargeList = self.expect_json("GET", path, StatusCode::OK, response).await?;
        Ok(list.result)
    }

    /// Fetch a single charge by identifier
    pub async fn fetch_charge(&self, token: &str, charge_id: &str) -> BillingResult<Charge> {
        let path = format!("/v1/direct_charge/{}", charge_id);

        let response = self
            .http
            .get(format!("{}{}", self.config.api_base_url, path))
            .bearer_auth(token)
            .send()
            .await?;

        self.expect_json("GET", path, StatusCode::OK, response).await
    }

    /// Check the response status and decode the body
    ///
    /// A status other than `expected` and an undecodable body both surface as
    /// `UnexpectedStatus`.
    async fn expect_json<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: String,
        expected: StatusCode,
        response: Response,
    ) -> BillingResult<T> {
        let status = response.status();
        if status != expected {
            tracing::warn!(
                method = method,
                path = %path,
                status = status.as_u16(),
                expected = expected.as_u16(),
                "Unexpected billing response status"
            );
            return Err(BillingError::UnexpectedStatus {
                method,
                path,
                status: status.as_u16(),
            });
        }

        match response.json::<T>().await {
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::warn!(
                    method = method,
                    path = %path,
                    error = %e,
                    "Undecodable billing response body"
                );
                Err(BillingError::UnexpectedStatus {
                    method,
                    path,
                    status: status.as_u16(),
                })
            }
        }
    }
}
