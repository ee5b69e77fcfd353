//! End-to-End Dashboard Cycle Tests
//!
//! Drives the dashboard against a mock backend:
//! 1. Status and history cycles filling the view state
//! 2. Failure asymmetry between the two cycles
//! 3. The guarded mode-change flow (decline, apply, reject)
//! 4. Poller task shutdown
//!
//! # Running the tests
//! ```bash
//! cargo test --test dashboard_cycle
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use rebal_dash::api::{BackendClient, Mode};
use rebal_dash::config::ServerConfig;
use rebal_dash::core::{
    history_task, poll_history_once, poll_status_once, status_task, ModeChangeOutcome,
    ModeController, NumericFormatter, StaticConfirmation, TableBody, NO_TRADES_NOTICE,
    STATUS_UNAVAILABLE_NOTICE,
};
use rebal_dash::tui::{AppState, SharedAppState};

// =============================================================================
// Helpers
// =============================================================================

const STATUS_BODY: &str = r#"{
    "mode": "PRODUCTION",
    "last_run": "12:30:05",
    "coin_price": 98543.21,
    "total_value": 150000.5,
    "roi": -3.4,
    "portfolio": [
        {"asset": "BTC", "coin_balance": 0.00512345, "balance_thb": 49271.6, "actual_pct": 12.0, "target_pct": 5.0},
        {"asset": "ETH", "coin_balance": 1.5, "balance_thb": 30000.0, "actual_pct": 20.0, "target_pct": 25.0},
        {"asset": "THB", "coin_balance": 70728.9, "balance_thb": 70728.9, "actual_pct": 68.0, "target_pct": 70.0}
    ]
}"#;

const HISTORY_BODY: &str = r#"{
    "trades": [
        {"timestamp": "2024-05-01 09:00:00", "asset": "BTC", "operation": "buy",
         "price": 98000.0, "amount_thb": 500.0, "coin_amount": 0.0051, "deviation": 6.2},
        {"timestamp": "2024-05-01 10:00:00", "asset": "BTC", "operation": "sell",
         "price": 99000.0, "amount_thb": 480.0, "coin_amount": 0.00485, "deviation": 5.8}
    ]
}"#;

fn client_for(url: String) -> Arc<BackendClient> {
    Arc::new(BackendClient::new(&ServerConfig {
        base_url: url,
        timeout_secs: 5,
    }))
}

fn fresh_state() -> SharedAppState {
    AppState::new("THB").into_shared()
}

fn formatter() -> NumericFormatter {
    NumericFormatter::new("THB")
}

// =============================================================================
// Test 1: Full Refresh Cycle
// =============================================================================

/// One status cycle and one history cycle fill every view region
#[tokio::test]
async fn test_full_refresh_cycle() {
    let mut server = mockito::Server::new_async().await;
    let status_mock = server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .create_async()
        .await;
    let history_mock = server
        .mock("GET", "/api/history")
        .with_status(200)
        .with_body(HISTORY_BODY)
        .create_async()
        .await;

    let client = client_for(server.url());
    let fmt = formatter();
    let state = fresh_state();

    poll_status_once(&client, &fmt, &state).await;
    poll_history_once(&client, &fmt, &state).await;

    status_mock.assert_async().await;
    history_mock.assert_async().await;

    let app = state.lock().unwrap();

    // Header region
    assert_eq!(app.header.mode_label, "PRODUCTION");
    assert_eq!(app.header.mode, Some(Mode::Production));
    assert_eq!(app.header.last_run, "12:30:05");
    assert_eq!(app.header.coin_price, "98,543.21");
    assert_eq!(app.header.total_value, "150,000.50 THB");
    assert_eq!(app.header.roi, "-3.40%");

    // Portfolio region: order preserved, profiles applied, highlight strict
    let TableBody::Rows(rows) = &app.portfolio else {
        panic!("expected portfolio rows");
    };
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].asset, "BTC");
    assert_eq!(rows[0].coin_balance, "0.00512345");
    assert!(rows[0].highlighted, "BTC deviates by 7 > 5");
    assert!(!rows[1].highlighted, "ETH deviates by exactly 5");
    assert_eq!(rows[2].coin_balance, "70,728.90", "quote asset row is fiat");
    assert!(!rows[2].highlighted);

    // History region: server order, operation casing, percent rule
    let TableBody::Rows(trades) = &app.history else {
        panic!("expected history rows");
    };
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].operation, "BUY");
    assert_eq!(trades[1].operation, "SELL");
    assert_eq!(trades[1].deviation, "5.80%");
}

// =============================================================================
// Test 2: Failure Asymmetry
// =============================================================================

/// A failed status cycle leaves the header stale and flags the portfolio;
/// a failed history cycle changes nothing at all
#[tokio::test]
async fn test_failure_asymmetry_between_cycles() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/api/history")
        .with_status(200)
        .with_body(HISTORY_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(server.url());
    let fmt = formatter();
    let state = fresh_state();

    poll_status_once(&client, &fmt, &state).await;
    poll_history_once(&client, &fmt, &state).await;

    // Backend goes away
    server.reset_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/api/history")
        .with_status(500)
        .create_async()
        .await;

    poll_status_once(&client, &fmt, &state).await;
    poll_history_once(&client, &fmt, &state).await;

    let app = state.lock().unwrap();

    // Status cycle: header stale, portfolio shows the error row
    assert_eq!(app.header.mode_label, "PRODUCTION");
    assert_eq!(app.header.roi, "-3.40%");
    assert_eq!(app.portfolio, TableBody::notice(STATUS_UNAVAILABLE_NOTICE));

    // History cycle: last successful render survives untouched
    let TableBody::Rows(trades) = &app.history else {
        panic!("history must keep its last successful render");
    };
    assert_eq!(trades.len(), 2);
}

/// The next successful tick heals the error row
#[tokio::test]
async fn test_status_cycle_self_heals() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(server.url());
    let fmt = formatter();
    let state = fresh_state();

    poll_status_once(&client, &fmt, &state).await;
    assert_eq!(
        state.lock().unwrap().portfolio,
        TableBody::notice(STATUS_UNAVAILABLE_NOTICE)
    );

    server.reset_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .create_async()
        .await;

    poll_status_once(&client, &fmt, &state).await;

    let app = state.lock().unwrap();
    let TableBody::Rows(rows) = &app.portfolio else {
        panic!("expected portfolio rows after recovery");
    };
    assert_eq!(rows.len(), 3);
}

// =============================================================================
// Test 3: Empty Payloads
// =============================================================================

#[tokio::test]
async fn test_empty_payloads_render_notices() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(r#"{"mode":"DRY_RUN","last_run":"09:00:00"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/history")
        .with_status(200)
        .with_body(r#"{"trades":[]}"#)
        .create_async()
        .await;

    let client = client_for(server.url());
    let fmt = formatter();
    let state = fresh_state();

    poll_status_once(&client, &fmt, &state).await;
    poll_history_once(&client, &fmt, &state).await;

    let app = state.lock().unwrap();
    // Snapshot without a portfolio still updates the header
    assert_eq!(app.header.mode_label, "DRY_RUN");
    assert_eq!(app.header.coin_price, "0.00");
    assert!(matches!(&app.portfolio, TableBody::Notice(_)));
    assert_eq!(app.history, TableBody::notice(NO_TRADES_NOTICE));
}

// =============================================================================
// Test 4: Guarded Mode Change
// =============================================================================

/// Declining the confirmation makes no network call at all
#[tokio::test]
async fn test_mode_change_declined_makes_no_calls() {
    let mut server = mockito::Server::new_async().await;
    let post = server
        .mock("POST", "/api/mode/production")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .expect(0)
        .create_async()
        .await;

    let controller = ModeController::new(
        client_for(server.url()),
        Arc::new(StaticConfirmation(false)),
        formatter(),
        fresh_state(),
    );

    let outcome = controller.set_mode(Mode::Production).await.unwrap();
    assert_eq!(outcome, ModeChangeOutcome::Declined);

    post.assert_async().await;
    get.assert_async().await;
}

/// A confirmed change posts exactly once and immediately refreshes status
#[tokio::test]
async fn test_mode_change_applied_posts_and_refreshes() {
    let mut server = mockito::Server::new_async().await;
    let post = server
        .mock("POST", "/api/mode/production")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .expect(1)
        .create_async()
        .await;

    let state = fresh_state();
    let controller = ModeController::new(
        client_for(server.url()),
        Arc::new(StaticConfirmation(true)),
        formatter(),
        state.clone(),
    );

    let outcome = controller.set_mode(Mode::Production).await.unwrap();
    assert_eq!(outcome, ModeChangeOutcome::Applied);

    post.assert_async().await;
    get.assert_async().await;

    // The out-of-band refresh already rendered the new snapshot
    let app = state.lock().unwrap();
    assert_eq!(app.header.mode_label, "PRODUCTION");
}

/// A rejected write is an error and triggers no out-of-band refresh
#[tokio::test]
async fn test_mode_change_rejection_skips_refresh() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/mode/dry_run")
        .with_status(503)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .expect(0)
        .create_async()
        .await;

    let controller = ModeController::new(
        client_for(server.url()),
        Arc::new(StaticConfirmation(true)),
        formatter(),
        fresh_state(),
    );

    let result = controller.set_mode(Mode::DryRun).await;
    assert!(result.is_err(), "rejected write must surface as an error");

    get.assert_async().await;
}

// =============================================================================
// Test 5: Poller Task Lifecycle
// =============================================================================

/// Both poller tasks start, run their immediate first cycle, and stop on
/// the shutdown broadcast
#[tokio::test]
async fn test_poller_tasks_shutdown_cleanly() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_body(STATUS_BODY)
        .create_async()
        .await;
    server
        .mock("GET", "/api/history")
        .with_status(200)
        .with_body(HISTORY_BODY)
        .create_async()
        .await;

    let client = client_for(server.url());
    let state = fresh_state();
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let status_handle = tokio::spawn(status_task(
        Arc::clone(&client),
        formatter(),
        state.clone(),
        shutdown_tx.subscribe(),
    ));
    let history_handle = tokio::spawn(history_task(
        Arc::clone(&client),
        formatter(),
        state.clone(),
        shutdown_tx.subscribe(),
    ));

    // Let the immediate first ticks run
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown_tx.send(()).unwrap();

    timeout(Duration::from_secs(1), status_handle)
        .await
        .expect("status poller should stop")
        .unwrap();
    timeout(Duration::from_secs(1), history_handle)
        .await
        .expect("history poller should stop")
        .unwrap();

    // Both startup cycles rendered before shutdown
    let app = state.lock().unwrap();
    assert_eq!(app.header.mode_label, "PRODUCTION");
    assert!(matches!(&app.history, TableBody::Rows(rows) if rows.len() == 2));
}
