//! Demo identity adapter
//!
//! Stands in for the hosted identity SDK: the handshake outcome is resolved
//! from environment variables so every view state can be exercised locally.
//!
//! - `IDENTITY_ACCESS_TOKEN`: the token to grant; unset means unauthorized
//! - `IDENTITY_SCOPES`: comma-separated scope list
//! - `IDENTITY_ERROR`: force a failure (`unauthorized`, `access_denied`, or
//!   any other string for an unclassified error)

use async_trait::async_trait;

use chargeview_session::{IdentityError, IdentityGrant, IdentityProvider};

pub struct EnvIdentityProvider {
    client_id: String,
}

impl EnvIdentityProvider {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for EnvIdentityProvider {
    async fn authenticate(&self) -> Result<IdentityGrant, IdentityError> {
        tracing::debug!(client_id = %self.client_id, "Resolving identity from environment");

        if let Ok(kind) = std::env::var("IDENTITY_ERROR") {
            return Err(match kind.as_str() {
                "unauthorized" => IdentityError::Unauthorized,
                "access_denied" => IdentityError::AccessDenied,
                other => IdentityError::Other(other.to_string()),
            });
        }

        match std::env::var("IDENTITY_ACCESS_TOKEN") {
            Ok(token) if !token.is_empty() => {
                let scopes = std::env::var("IDENTITY_SCOPES")
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                Ok(IdentityGrant {
                    access_token: token,
                    scopes,
                })
            }
            _ => Err(IdentityError::Unauthorized),
        }
    }

    async fn sign_out(&self) {
        tracing::info!(client_id = %self.client_id, "Signed out of identity provider");
    }
}
