//! Modal confirmation backed by the dashboard's y/n prompt
//!
//! `confirm()` parks the requested mode in the view state, which makes the
//! draw layer show the prompt, then waits for the answer the key handler
//! sends. The prompt clears whichever way the operator answers.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::api::Mode;
use crate::core::mode::Confirmation;

use super::app::SharedAppState;

pub struct ModalConfirmation {
    state: SharedAppState,
    answers: Mutex<mpsc::Receiver<bool>>,
}

impl ModalConfirmation {
    pub fn new(state: SharedAppState, answers: mpsc::Receiver<bool>) -> Self {
        Self {
            state,
            answers: Mutex::new(answers),
        }
    }
}

#[async_trait]
impl Confirmation for ModalConfirmation {
    async fn confirm(&self, target: Mode) -> bool {
        let mut answers = self.answers.lock().await;

        // Discard answers queued before this prompt appeared
        while answers.try_recv().is_ok() {}

        if let Ok(mut app) = self.state.lock() {
            app.pending_mode = Some(target);
        }

        // A closed channel means the UI is gone; treat as declined
        let answer = answers.recv().await.unwrap_or(false);

        if let Ok(mut app) = self.state.lock() {
            app.pending_mode = None;
        }

        answer
    }
}

// ============================================================================
// Tests
// ============================================================================
