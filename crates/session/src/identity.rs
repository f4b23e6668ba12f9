//! Identity provider boundary
//!
//! The actual identity SDK is an external collaborator. This module pins down
//! the contract the session controller relies on: one asynchronous handshake
//! yielding a token plus scopes or a classified error, and a sign-out that
//! resolves once the provider has cleared its session.

use async_trait::async_trait;
use thiserror::Error;

use chargeview_shared::Scopes;

/// Handshake failure, classified once at the provider boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No identity established (the user has not signed in)
    #[error("identity not authorized")]
    Unauthorized,

    /// Identity established but this application is not accessible to it
    #[error("access denied")]
    AccessDenied,

    /// Anything else the provider reports
    #[error("identity handshake failed: {0}")]
    Other(String),
}

/// Successful handshake payload
#[derive(Debug, Clone)]
pub struct IdentityGrant {
    pub access_token: String,
    pub scopes: Scopes,
}

/// External identity collaborator
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Perform the identity handshake
    async fn authenticate(&self) -> Result<IdentityGrant, IdentityError>;

    /// Clear the provider-side session; resolves when done
    async fn sign_out(&self);
}
