//! Session controller
//!
//! Owns the session value and drives it through the view-state machine:
//! identity handshake, initial charge list load, optional post-redirect
//! charge confirmation with a status watch, and the buy / sign-out actions.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::{watch, Mutex};

use chargeview_billing::BillingClient;
use chargeview_shared::ViewState;

use crate::identity::IdentityProvider;
use crate::poller::{self, PollerHandle};
use crate::state::{Session, SessionEvent};

/// Fixed demo purchase parameters ($1.25 test item)
const DEMO_ITEM_NAME: &str = "Item XYZ";
const DEMO_ITEM_PRICE: u32 = 125;
const DEMO_ITEM_QUANTITY: u32 = 1;

/// Default status poll interval (5 seconds)
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Get configured poll interval
fn default_poll_interval() -> Duration {
    static SECS: OnceLock<u64> = OnceLock::new();
    Duration::from_secs(*SECS.get_or_init(|| {
        std::env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
    }))
}

/// Presentation-owned navigation collaborator
///
/// The buy flow hands the charge confirmation URL to whatever hosts the app
/// (a browser redirect in the original deployment).
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str);
}

/// Drives the session state machine
pub struct SessionController {
    identity: Arc<dyn IdentityProvider>,
    billing: BillingClient,
    navigator: Arc<dyn Navigator>,
    /// Return URL for charges created by the buy action
    app_url: String,
    state: watch::Sender<Session>,
    poller: Mutex<Option<PollerHandle>>,
    poll_interval: Duration,
}

impl SessionController {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        billing: BillingClient,
        navigator: Arc<dyn Navigator>,
        app_url: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            identity,
            billing,
            navigator,
            app_url: app_url.into(),
            state,
            poller: Mutex::new(None),
            poll_interval: default_poll_interval(),
        }
    }

    /// Override the status poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Subscribe to session snapshots (one per transition)
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Current session snapshot
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Whether a charge status watch is currently running
    pub async fn is_watching_status(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .map(|p| !p.is_finished())
            .unwrap_or(false)
    }

    fn apply(&self, event: SessionEvent) {
        // send_modify serializes the read-modify-write against concurrent
        // poller updates
        self.state
            .send_modify(|session| *session = session.apply(&event));
    }

    /// Run the initialization sequence to its terminal transition
    ///
    /// This is the only entry into the state machine. `launch_charge_id` is
    /// the `id` query parameter of the launch URL, present when the buyer
    /// comes back from a confirmation page redirect.
    pub async fn run_to_loaded(&self, launch_charge_id: Option<&str>) {
        let grant = match self.identity.authenticate().await {
            Ok(grant) => grant,
            Err(error) => {
                tracing::warn!(error = %error, "Identity handshake failed");
                self.apply(SessionEvent::HandshakeFailed(error));
                return;
            }
        };

        let token = grant.access_token.clone();
        self.apply(SessionEvent::HandshakeSucceeded {
            access_token: grant.access_token,
            scopes: grant.scopes,
        });

        match self.billing.fetch_charges(&token).await {
            Ok(charges) => {
                tracing::info!(count = charges.len(), "Charge list loaded");
                self.apply(SessionEvent::ChargesLoaded(charges));
            }
            Err(e) => {
                // No automatic retry; the list stays absent for this session
                tracing::warn!(error = %e, "Initial charge list load failed");
            }
        }

        if let Some(charge_id) = launch_charge_id {
            match self.billing.confirm_charge(&token, charge_id).await {
                Ok(_) => {
                    tracing::info!(charge_id = %charge_id, "Charge confirmed; watching status");
                    self.start_status_watch(token, charge_id.to_string()).await;
                }
                Err(e) => {
                    tracing::warn!(
                        charge_id = %charge_id,
                        error = %e,
                        "Charge confirmation failed; skipping status watch"
                    );
                }
            }
        }

        self.apply(SessionEvent::Ready);
    }

    /// Create the fixed demo charge and hand its confirmation URL to the
    /// navigator
    ///
    /// Only acts from the loaded view with billing access; any failure is
    /// logged and the session is left untouched.
    pub async fn buy(&self) {
        let session = self.session();
        if session.view != ViewState::Loaded || !session.has_billing_access {
            tracing::warn!(view = %session.view, "Buy action unavailable");
            return;
        }
        let Some(token) = session.access_token else {
            tracing::warn!("Buy action without access token");
            return;
        };

        match self
            .billing
            .create_charge(
                &token,
                &self.app_url,
                DEMO_ITEM_NAME,
                DEMO_ITEM_PRICE,
                DEMO_ITEM_QUANTITY,
            )
            .await
        {
            Ok(created) => {
                tracing::info!(charge_id = %created.id, "Test charge created");
                self.navigator.open(&created.confirmation_url);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Test charge creation failed");
            }
        }
    }

    /// Sign out of the identity provider and reset the session
    ///
    /// Valid from any state; also stops a running status watch so no task
    /// outlives the session it belongs to.
    pub async fn sign_out(&self) {
        self.identity.sign_out().await;
        self.cancel_status_watch().await;
        self.apply(SessionEvent::SignedOut);
    }

    /// Session teardown; stops the status watch
    pub async fn shutdown(&self) {
        self.cancel_status_watch().await;
    }

    /// Start watching one charge; at most one watch runs at a time
    async fn start_status_watch(&self, token: String, charge_id: String) {
        let handle = poller::spawn_status_watch(
            self.billing.clone(),
            token,
            charge_id,
            self.state.clone(),
            self.poll_interval,
        );
        if let Some(previous) = self.poller.lock().await.replace(handle) {
            previous.cancel();
        }
    }

    async fn cancel_status_watch(&self) {
        if let Some(poller) = self.poller.lock().await.take() {
            poller.cancel();
        }
    }
}
