//! Async keyboard event handling for the dashboard
//!
//! Uses crossterm's EventStream for non-blocking, async-compatible input.
//! Key mapping is a pure function over the current prompt state so it can
//! be tested without a terminal.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyModifiers};
use futures_util::StreamExt;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::api::Mode;
use crate::core::mode::ModeController;

use super::app::SharedAppState;

/// Alert shown when the mode-change write fails
pub const MODE_CHANGE_FAILED_NOTICE: &str = "Mode change failed; backend state unchanged";

/// Result of processing a single event poll cycle
pub enum EventResult {
    /// Continue the TUI loop
    Continue,
    /// User requested quit
    Quit,
}

/// What a key press should do, given whether a confirmation is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
    /// Start the confirm-then-switch flow for a mode
    RequestMode(Mode),
    /// Answer the pending confirmation prompt
    Answer(bool),
}

/// Pure key mapping: mode requests while idle, y/n while a prompt is open
pub fn map_key(code: KeyCode, modifiers: KeyModifiers, awaiting_answer: bool) -> KeyAction {
    if awaiting_answer {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Answer(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => KeyAction::Answer(false),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            _ => KeyAction::Continue,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::RequestMode(Mode::DryRun),
        KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::RequestMode(Mode::Production),
        _ => KeyAction::Continue,
    }
}

/// Poll for keyboard events asynchronously with a short timeout.
///
/// The timeout doubles as the redraw tick: the run loop draws once per
/// call whether or not a key arrived.
pub async fn handle_events_async(
    state: &SharedAppState,
    controller: &Arc<ModeController>,
    answer_tx: &mpsc::Sender<bool>,
    shutdown_tx: &broadcast::Sender<()>,
    event_stream: &mut EventStream,
) -> EventResult {
    let maybe_event =
        tokio::time::timeout(std::time::Duration::from_millis(50), event_stream.next()).await;

    match maybe_event {
        // Timeout elapsed - no input
        Err(_) => EventResult::Continue,
        // Stream ended (terminal closed)
        Ok(None) => EventResult::Quit,
        Ok(Some(event_result)) => match event_result {
            Err(e) => {
                warn!(error = %e, "Terminal I/O error during event polling");
                EventResult::Continue
            }
            Ok(Event::Key(key)) => {
                process_key_event(key.code, key.modifiers, state, controller, answer_tx, shutdown_tx)
            }
            Ok(_) => EventResult::Continue,
        },
    }
}

/// Apply a single key event to the dashboard
fn process_key_event(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &SharedAppState,
    controller: &Arc<ModeController>,
    answer_tx: &mpsc::Sender<bool>,
    shutdown_tx: &broadcast::Sender<()>,
) -> EventResult {
    let awaiting_answer = state
        .lock()
        .map(|app| app.pending_mode.is_some())
        .unwrap_or(false);

    // Any key press dismisses a lingering alert
    if let Ok(mut app) = state.lock() {
        app.notice = None;
    }

    match map_key(code, modifiers, awaiting_answer) {
        KeyAction::Continue => EventResult::Continue,
        KeyAction::Quit => {
            if let Ok(mut app) = state.lock() {
                app.should_quit = true;
            }
            let _ = shutdown_tx.send(());
            EventResult::Quit
        }
        KeyAction::RequestMode(target) => {
            spawn_mode_change(target, controller, state);
            EventResult::Continue
        }
        KeyAction::Answer(answer) => {
            // Full prompt queue means an answer is already in flight; drop
            let _ = answer_tx.try_send(answer);
            EventResult::Continue
        }
    }
}

/// Run the confirm/write/refresh sequence without blocking the event loop
fn spawn_mode_change(target: Mode, controller: &Arc<ModeController>, state: &SharedAppState) {
    let controller = Arc::clone(controller);
    let state = Arc::clone(state);

    tokio::spawn(async move {
        if let Err(e) = controller.set_mode(target).await {
            warn!(error = %e, mode = target.label(), "Mode change failed");
            if let Ok(mut app) = state.lock() {
                app.notice = Some(MODE_CHANGE_FAILED_NOTICE.to_string());
            }
        }
    });
}

// ============================================================================
// Tests
// ============================================================================
