//! Application configuration

use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the billing service
    pub billing_api_url: String,
    /// Client identifier registered with the identity provider
    pub identity_client_id: String,
    /// Where the confirmation page sends the buyer back to
    pub app_url: String,
    /// Whether charges are created in test mode
    pub direct_charge_test: bool,
    /// URL the app was launched with; its `id` query parameter triggers the
    /// post-redirect confirmation flow
    pub launch_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            billing_api_url: env::var("BILLING_API_URL")
                .map_err(|_| ConfigError::Missing("BILLING_API_URL"))?,
            identity_client_id: env::var("IDENTITY_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("IDENTITY_CLIENT_ID"))?,
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            direct_charge_test: env::var("DIRECT_CHARGE_TEST")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            launch_url: env::var("LAUNCH_URL").ok(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
