//! Terminal dashboard
//!
//! # Keyboard Controls
//! - `q` or `Ctrl+C`: Quit
//! - `d`: Switch backend to DRY_RUN (after confirmation)
//! - `p`: Switch backend to PRODUCTION (after confirmation)
//! - `y` / `n`: Answer the confirmation prompt

pub mod app;
pub mod confirm;
pub mod event;
pub mod logging;
pub mod run;
pub mod ui;

pub use app::{AppState, LogEntry, SharedAppState, MAX_LOG_ENTRIES};
pub use confirm::ModalConfirmation;
pub use run::run;
