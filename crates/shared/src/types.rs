//! Common types used across chargeview

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Scope string that grants permission to create and activate charges
pub const BILLING_MANAGE_SCOPE: &str = "billing_manage";

// =============================================================================
// Charge lifecycle
// =============================================================================

/// Lifecycle status of a charge
///
/// The billing service owns this vocabulary and may grow it; statuses we do
/// not recognize are carried through as `Other` and treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChargeStatus {
    Pending,
    Success,
    Declined,
    Other(String),
}

impl ChargeStatus {
    /// A terminal charge never changes status again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Declined)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Declined => "declined",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ChargeStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "success" => Self::Success,
            "declined" => Self::Declined,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ChargeStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ChargeStatus> for String {
    fn from(status: ChargeStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A charge as returned by the list and fetch endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    pub status: ChargeStatus,
}

/// A freshly created charge
///
/// The create endpoint additionally returns the page the buyer must visit to
/// authorize the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCharge {
    pub id: String,
    pub status: ChargeStatus,
    pub confirmation_url: String,
}

// =============================================================================
// Identity
// =============================================================================

/// Set of permission scopes granted by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scopes(BTreeSet<String>);

impl Scopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    /// Whether the granted scopes permit creating and activating charges
    pub fn has_billing_access(&self) -> bool {
        self.contains(BILLING_MANAGE_SCOPE)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Scopes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// View state
// =============================================================================

/// Top-level display state of the application
///
/// Exactly one is active at a time. `Loaded` is entered at most once per
/// session and left only through sign-out, which returns to `NotAuthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    NotAuthorized,
    AccessDenied,
    Error,
    Loaded,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Loading
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::NotAuthorized => write!(f, "not_authorized"),
            Self::AccessDenied => write!(f, "access_denied"),
            Self::Error => write!(f, "error"),
            Self::Loaded => write!(f, "loaded"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_status_roundtrip() {
        assert_eq!(ChargeStatus::from("pending"), ChargeStatus::Pending);
        assert_eq!(ChargeStatus::from("success"), ChargeStatus::Success);
        assert_eq!(ChargeStatus::from("declined"), ChargeStatus::Declined);
        assert_eq!(
            ChargeStatus::from("processing"),
            ChargeStatus::Other("processing".to_string())
        );

        assert_eq!(ChargeStatus::Pending.to_string(), "pending");
        assert_eq!(
            ChargeStatus::Other("processing".to_string()).to_string(),
            "processing"
        );
    }

    #[test]
    fn test_charge_status_terminal() {
        assert!(ChargeStatus::Success.is_terminal());
        assert!(ChargeStatus::Declined.is_terminal());
        assert!(!ChargeStatus::Pending.is_terminal());
        assert!(!ChargeStatus::Other("processing".to_string()).is_terminal());
    }

    #[test]
    fn test_charge_deserialize() {
        let charge: Charge =
            serde_json::from_str(r#"{"id":"c1","created_at":100,"status":"success"}"#).unwrap();
        assert_eq!(charge.id, "c1");
        assert_eq!(charge.created_at.unix_timestamp(), 100);
        assert_eq!(charge.status, ChargeStatus::Success);
    }

    #[test]
    fn test_charge_serialize_status_as_string() {
        let charge = Charge {
            id: "c1".to_string(),
            created_at: OffsetDateTime::from_unix_timestamp(100).unwrap(),
            status: ChargeStatus::Other("processing".to_string()),
        };
        let json = serde_json::to_value(&charge).unwrap();
        assert_eq!(json["status"], "processing");
        assert_eq!(json["created_at"], 100);
    }

    #[test]
    fn test_scopes_billing_access() {
        let scopes: Scopes = ["billing_manage", "agents_read"].into_iter().collect();
        assert!(scopes.has_billing_access());

        let scopes: Scopes = ["agents_read"].into_iter().collect();
        assert!(!scopes.has_billing_access());

        assert!(!Scopes::new().has_billing_access());

        // Membership is literal, not prefix based
        let scopes: Scopes = ["billing_manage_all"].into_iter().collect();
        assert!(!scopes.has_billing_access());
    }

    #[test]
    fn test_view_state_default() {
        assert_eq!(ViewState::default(), ViewState::Loading);
    }

    #[test]
    fn test_view_state_display() {
        assert_eq!(ViewState::NotAuthorized.to_string(), "not_authorized");
        assert_eq!(ViewState::Loaded.to_string(), "loaded");
    }
}
