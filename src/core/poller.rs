//! Polling tasks for the status and history refresh cycles
//!
//! Two independent `tokio::time::interval` tasks drive the dashboard: a
//! fast status cycle and a slow history cycle. Each tick fetches, parses,
//! projects, and replaces its view region wholesale. The single-cycle
//! functions are the real work; the tasks only wrap them in a timer loop
//! with a shutdown receiver, so tests drive cycles directly instead of
//! waiting on wall-clock ticks.
//!
//! A failed cycle never schedules a retry - the next tick is the retry.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::api::BackendClient;
use crate::tui::app::SharedAppState;

use super::format::NumericFormatter;
use super::render;

/// Status refresh cadence (fixed by the backend contract)
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// History refresh cadence (fixed by the backend contract)
pub const HISTORY_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Run one status cycle: fetch, project, replace the status view region
///
/// On failure the numeric header keeps its last-known values and the
/// portfolio table degrades to the connectivity notice.
pub async fn poll_status_once(
    client: &BackendClient,
    fmt: &NumericFormatter,
    state: &SharedAppState,
) {
    match client.fetch_status().await {
        Ok(snapshot) => {
            let header = render::status_header(&snapshot, fmt);
            let portfolio = render::portfolio_body(snapshot.portfolio.as_deref(), fmt);
            if let Ok(mut app) = state.lock() {
                app.apply_status(header, portfolio);
            }
        }
        Err(e) => {
            warn!(error = %e, "Status fetch failed");
            if let Ok(mut app) = state.lock() {
                app.mark_status_unavailable();
            }
        }
    }
}

/// Run one history cycle: fetch, project, replace the history view region
///
/// On failure the previously rendered history stays visible - only a
/// diagnostic log records the miss. This asymmetry with the status cycle
/// is deliberate.
pub async fn poll_history_once(
    client: &BackendClient,
    fmt: &NumericFormatter,
    state: &SharedAppState,
) {
    match client.fetch_history().await {
        Ok(response) => {
            let body = render::history_body(response.trades.unwrap_or_default(), fmt);
            if let Ok(mut app) = state.lock() {
                app.apply_history(body);
            }
        }
        Err(e) => {
            warn!(error = %e, "History fetch failed, keeping last render");
        }
    }
}

/// Status poller: one cycle per second until shutdown
///
/// The interval's first tick fires immediately, giving the startup fetch.
pub async fn status_task(
    client: Arc<BackendClient>,
    fmt: NumericFormatter,
    state: SharedAppState,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    info!("Status poller started");

    let mut ticks = interval(STATUS_POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Status poller shutting down");
                break;
            }
            _ = ticks.tick() => {
                poll_status_once(&client, &fmt, &state).await;
            }
        }
    }

    info!("Status poller stopped");
}

/// History poller: one cycle every 30 seconds until shutdown
pub async fn history_task(
    client: Arc<BackendClient>,
    fmt: NumericFormatter,
    state: SharedAppState,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    info!("History poller started");

    let mut ticks = interval(HISTORY_POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("History poller shutting down");
                break;
            }
            _ = ticks.tick() => {
                poll_history_once(&client, &fmt, &state).await;
            }
        }
    }

    info!("History poller stopped");
}

// ============================================================================
// Tests
// ============================================================================
