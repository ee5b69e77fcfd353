//! Rebalancer Dashboard - Entry Point
//!
//! Wires the pieces together:
//! 1. Config + logging initialization
//! 2. Shared view state and backend client
//! 3. Status poller (1s) and history poller (30s)
//! 4. Terminal dashboard with guarded mode switching
//!    (or headless log output with LOG_FORMAT=json/pretty)

use std::sync::Arc;

use tokio::signal;
use tokio::sync::{broadcast, mpsc};
use tracing::info;

use rebal_dash::api::BackendClient;
use rebal_dash::config::{self, LogMode};
use rebal_dash::core::{history_task, status_task, ModeController, NumericFormatter};
use rebal_dash::tui::{self, AppState, ModalConfirmation};

/// Capacity of the y/n answer channel between the key handler and the
/// confirmation prompt
const ANSWER_CHANNEL_CAPACITY: usize = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    let log_mode = config::log_mode();
    if log_mode != LogMode::Tui {
        config::init_logging(log_mode);
    }

    let dashboard_config = match config::load_or_default(&config::config_path()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration failed: {}", e);
            std::process::exit(1);
        }
    };

    let quote_asset = dashboard_config.display.quote_asset.clone();
    let state = AppState::new(&quote_asset).into_shared();

    if log_mode == LogMode::Tui {
        tui::logging::init(state.clone());
    }

    info!(
        base_url = %dashboard_config.server.base_url,
        quote_asset = %quote_asset,
        "Rebalancer dashboard starting"
    );

    let formatter = NumericFormatter::new(&quote_asset);
    let client = Arc::new(BackendClient::new(&dashboard_config.server));

    // Shutdown broadcast for the poller tasks
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    tokio::spawn(status_task(
        Arc::clone(&client),
        formatter.clone(),
        state.clone(),
        shutdown_tx.subscribe(),
    ));
    tokio::spawn(history_task(
        Arc::clone(&client),
        formatter.clone(),
        state.clone(),
        shutdown_tx.subscribe(),
    ));

    match log_mode {
        LogMode::Tui => {
            let (answer_tx, answer_rx) = mpsc::channel(ANSWER_CHANNEL_CAPACITY);
            let confirmation = Arc::new(ModalConfirmation::new(state.clone(), answer_rx));
            let controller = Arc::new(ModeController::new(
                Arc::clone(&client),
                confirmation,
                formatter,
                state.clone(),
            ));

            tui::run(state, controller, answer_tx, shutdown_tx.clone()).await?;
            let _ = shutdown_tx.send(());
        }
        _ => {
            // Headless: pollers keep logging snapshots until Ctrl+C
            info!("Headless mode; press Ctrl+C to stop");
            signal::ctrl_c().await?;
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(());
        }
    }

    info!("Clean exit");
    Ok(())
}
