//! Guarded mode-change dispatch
//!
//! A mode change is the dashboard's only write. It goes through three
//! steps: confirm with the operator, POST the command, then refresh the
//! status view out of band so the indicator reflects the new state without
//! waiting for the next tick. Declining aborts before any network call;
//! a failed write surfaces to the caller and triggers no refresh.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::{BackendClient, Mode};
use crate::error::Result;
use crate::tui::app::SharedAppState;

use super::format::NumericFormatter;
use super::poller::poll_status_once;

/// Operator confirmation capability
///
/// Injected so the TUI can show a modal prompt while tests substitute a
/// fixed answer.
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Ask the operator to confirm switching to `target`
    async fn confirm(&self, target: Mode) -> bool;
}

/// Fixed-answer confirmation for tests and non-interactive use
#[derive(Debug, Clone, Copy)]
pub struct StaticConfirmation(pub bool);

#[async_trait]
impl Confirmation for StaticConfirmation {
    async fn confirm(&self, _target: Mode) -> bool {
        self.0
    }
}

/// What a `set_mode` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChangeOutcome {
    /// Operator declined; no network call was made
    Declined,
    /// Backend accepted the change and the status view was refreshed
    Applied,
}

/// Dispatches mode changes against the backend
///
/// Constructed once with its collaborators injected; holds no other state.
pub struct ModeController {
    client: Arc<BackendClient>,
    confirmation: Arc<dyn Confirmation>,
    fmt: NumericFormatter,
    state: SharedAppState,
}

impl ModeController {
    pub fn new(
        client: Arc<BackendClient>,
        confirmation: Arc<dyn Confirmation>,
        fmt: NumericFormatter,
        state: SharedAppState,
    ) -> Self {
        Self {
            client,
            confirmation,
            fmt,
            state,
        }
    }

    /// Run the confirm / write / refresh sequence for `target`
    pub async fn set_mode(&self, target: Mode) -> Result<ModeChangeOutcome> {
        if !self.confirmation.confirm(target).await {
            info!(mode = target.label(), "Mode change declined by operator");
            return Ok(ModeChangeOutcome::Declined);
        }

        self.client.set_mode(target).await?;

        info!(mode = target.label(), "Mode change accepted, refreshing status");
        poll_status_once(&self.client, &self.fmt, &self.state).await;

        Ok(ModeChangeOutcome::Applied)
    }
}

// ============================================================================
// Tests
// ============================================================================
