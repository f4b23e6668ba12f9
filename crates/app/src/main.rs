//! Chargeview demo application
//!
//! Signs in through the identity adapter, shows the recent charges and lets
//! an authorized user make a test payment and follow its confirmation status.

mod config;
mod identity;
mod render;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use chargeview_billing::{BillingClient, BillingConfig};
use chargeview_session::{charge_id_from_url, SessionController};

use crate::config::AppConfig;
use crate::identity::EnvIdentityProvider;
use crate::render::LogNavigator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    info!("Starting chargeview");

    let config = AppConfig::from_env()?;

    let identity = Arc::new(EnvIdentityProvider::new(config.identity_client_id.clone()));
    let billing = BillingClient::new(BillingConfig {
        api_base_url: config.billing_api_url.clone(),
        test_mode: config.direct_charge_test,
    });
    let controller = Arc::new(SessionController::new(
        identity,
        billing,
        Arc::new(LogNavigator),
        config.app_url.clone(),
    ));

    // Render every session transition
    let mut updates = controller.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            {
                let session = updates.borrow_and_update();
                render::render(&session);
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
    });

    // User actions arrive as console commands
    let actions = controller.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match line.trim() {
                "buy" => actions.buy().await,
                "signout" => actions.sign_out().await,
                "" => {}
                other => warn!(command = %other, "Unknown command"),
            }
        }
    });

    let launch_charge_id = config.launch_url.as_deref().and_then(charge_id_from_url);
    if let Some(charge_id) = &launch_charge_id {
        info!(charge_id = %charge_id, "Launch URL carries a charge to confirm");
    }

    controller.run_to_loaded(launch_charge_id.as_deref()).await;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    controller.shutdown().await;
    renderer.abort();

    Ok(())
}
