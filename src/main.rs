//! # Food Delivery Server
//!
//! Starts the stores, builds the HTTP state and serves until Ctrl+C or
//! SIGTERM. Settings come from the environment (a `.env` file is read first
//! when present); see [`Config`](food_delivery::config::Config).
//!
//! ```bash
//! RUST_LOG=info PORT=8000 cargo run
//! ```

use food_delivery::config::Config;
use food_delivery::http::{serve, AppState};
use food_delivery::lifecycle::DeliverySystem;
use food_delivery::notification::{LogMailer, Mailer, SmtpMailer};
use resource_actor::tracing::setup_tracing;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::load().map_err(|e| e.to_string())?;
    info!(port = config.port, debug = config.debug, "Starting food delivery server");

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => match SmtpMailer::new(smtp, &config.mail_from) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                warn!(error = %e, "SMTP settings unusable, logging emails instead");
                Arc::new(LogMailer)
            }
        },
        None => Arc::new(LogMailer),
    };

    let system = DeliverySystem::new();
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(|e| format!("cannot bind port {}: {e}", config.port))?;

    let state = AppState::new(config, system.stores.clone(), mailer);
    let served = serve(listener, state).await;

    // The router and its state are gone once serve returns, so the stores
    // held by the system are the last clients left.
    system.shutdown().await.map_err(|e| e.to_string())?;
    served.map_err(|e| e.to_string())?;

    info!("Shutdown complete");
    Ok(())
}
