//! Console presentation of the session
//!
//! Keeps the same surface the original page had: one message per dead-end
//! state, a charge table when loaded, and a purchase prompt gated on billing
//! access.

use chargeview_session::{Navigator, Session};
use chargeview_shared::ViewState;

/// Navigator that reports the confirmation URL instead of opening a browser
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open(&self, url: &str) {
        tracing::info!(url = %url, "Confirmation page ready");
        println!();
        println!("Open this page to authorize the payment:");
        println!("  {}", url);
    }
}

/// Print the current session
pub fn render(session: &Session) {
    println!();
    match session.view {
        ViewState::Loading => println!("Loading..."),
        ViewState::NotAuthorized => {
            println!("You must sign in with your account before you can make a test purchase.");
        }
        ViewState::AccessDenied => {
            println!("Access denied.");
            println!(
                "Probably this application is installed on a different account \
                 and you do not have access to it."
            );
        }
        ViewState::Error => {
            println!("Something is wrong. Check the logs to see error details.");
        }
        ViewState::Loaded => render_loaded(session),
    }
}

fn render_loaded(session: &Session) {
    let Some(charges) = &session.charges else {
        println!("Loading...");
        return;
    };

    if !charges.is_empty() {
        println!("Latest charges");
        println!("{:<24} {:<28} {:<10}", "ID", "created", "status");
        for charge in charges {
            println!(
                "{:<24} {:<28} {:<10}",
                charge.id, charge.created_at, charge.status
            );
        }
    }

    if session.has_billing_access {
        println!("Type 'buy' to make a test payment for $1.25, or 'signout' to sign out.");
    } else {
        println!("You do not have permission to make a purchase. Only license owners can do that.");
        println!("Type 'signout' to sign out.");
    }
}
