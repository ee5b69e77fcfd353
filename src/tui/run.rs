//! Terminal lifecycle and the dashboard's main loop
//!
//! Owns raw mode and the alternate screen; everything else is delegated:
//! pollers fill the view state, the event handler applies keys, and each
//! pass through the loop redraws whatever the state currently holds.

use std::io::stdout;
use std::sync::Arc;

use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{broadcast, mpsc};

use crate::core::mode::ModeController;
use crate::error::Result;

use super::app::SharedAppState;
use super::event::{self, EventResult};
use super::ui;

/// Run the dashboard until the operator quits
pub async fn run(
    state: SharedAppState,
    controller: Arc<ModeController>,
    answer_tx: mpsc::Sender<bool>,
    shutdown_tx: broadcast::Sender<()>,
) -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut events = EventStream::new();

    let result = loop {
        let quit = state.lock().map(|app| app.should_quit).unwrap_or(true);
        if quit {
            break Ok(());
        }

        if let Ok(app) = state.lock() {
            if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
                break Err(e.into());
            }
        }

        match event::handle_events_async(&state, &controller, &answer_tx, &shutdown_tx, &mut events)
            .await
        {
            EventResult::Quit => break Ok(()),
            EventResult::Continue => {}
        }
    };

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result
}
