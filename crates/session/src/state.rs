//! Session state and its transition function
//!
//! The session is an immutable value: every event produces a new `Session`
//! through [`Session::apply`], including charge status updates, which replace
//! the affected list entry rather than mutating it in place.

use chargeview_shared::{Charge, ChargeStatus, Scopes, ViewState};

use crate::identity::IdentityError;

/// Snapshot of the authenticated session and what the UI should show
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub has_billing_access: bool,
    pub view: ViewState,
    /// `None` until the initial list load succeeds; stays `None` for the
    /// whole session if that load fails.
    pub charges: Option<Vec<Charge>>,
}

/// Everything that can move the session forward
#[derive(Debug, Clone)]
pub enum SessionEvent {
    HandshakeFailed(IdentityError),
    HandshakeSucceeded {
        access_token: String,
        scopes: Scopes,
    },
    ChargesLoaded(Vec<Charge>),
    ChargeStatusChanged {
        id: String,
        status: ChargeStatus,
    },
    /// Initialization finished; enter the loaded view
    Ready,
    SignedOut,
}

impl Session {
    /// Apply one event, producing the next session value
    pub fn apply(&self, event: &SessionEvent) -> Session {
        match event {
            SessionEvent::HandshakeFailed(error) => Session {
                view: classify_handshake_failure(error),
                ..Session::default()
            },
            SessionEvent::HandshakeSucceeded {
                access_token,
                scopes,
            } => Session {
                access_token: Some(access_token.clone()),
                has_billing_access: scopes.has_billing_access(),
                ..self.clone()
            },
            SessionEvent::ChargesLoaded(charges) => Session {
                charges: Some(charges.clone()),
                ..self.clone()
            },
            SessionEvent::ChargeStatusChanged { id, status } => Session {
                charges: self.charges.as_ref().map(|charges| {
                    charges
                        .iter()
                        .map(|charge| {
                            if charge.id == *id {
                                Charge {
                                    status: status.clone(),
                                    ..charge.clone()
                                }
                            } else {
                                charge.clone()
                            }
                        })
                        .collect()
                }),
                ..self.clone()
            },
            SessionEvent::Ready => Session {
                view: ViewState::Loaded,
                ..self.clone()
            },
            SessionEvent::SignedOut => Session {
                view: ViewState::NotAuthorized,
                ..Session::default()
            },
        }
    }
}

/// Total mapping from handshake failures to dead-end view states
fn classify_handshake_failure(error: &IdentityError) -> ViewState {
    match error {
        IdentityError::Unauthorized => ViewState::NotAuthorized,
        IdentityError::AccessDenied => ViewState::AccessDenied,
        IdentityError::Other(_) => ViewState::Error,
    }
}
