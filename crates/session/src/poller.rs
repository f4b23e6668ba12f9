//! Charge status poller
//!
//! One background task per watched charge. Ticks at a fixed interval (the
//! first tick fires immediately), fetches the charge and applies the status
//! to the session. Stops on its own strictly after observing a terminal
//! status; any fetch failure is logged and retried on the next tick.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use chargeview_billing::BillingClient;

use crate::state::{Session, SessionEvent};

/// Cancellation handle for a running status watch
///
/// Owned by the session controller; cancellation happens on sign-out and
/// session teardown, not only when the charge settles.
pub struct PollerHandle {
    handle: JoinHandle<()>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the watch task has stopped (settled charge or canceled)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn the status watch task for one charge
pub(crate) fn spawn_status_watch(
    billing: BillingClient,
    token: String,
    charge_id: String,
    state: watch::Sender<Session>,
    interval: Duration,
) -> PollerHandle {
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            match billing.fetch_charge(&token, &charge_id).await {
                Ok(charge) => {
                    let status = charge.status.clone();
                    state.send_modify(|session| {
                        *session = session.apply(&SessionEvent::ChargeStatusChanged {
                            id: charge.id.clone(),
                            status: charge.status.clone(),
                        });
                    });

                    if status.is_terminal() {
                        tracing::info!(
                            charge_id = %charge_id,
                            status = %status,
                            "Charge settled; stopping status watch"
                        );
                        break;
                    }
                }
                Err(e) => {
                    // The interval itself is the retry mechanism
                    tracing::warn!(
                        charge_id = %charge_id,
                        error = %e,
                        "Charge status check failed; retrying on next tick"
                    );
                }
            }
        }
    });

    PollerHandle { handle }
}
