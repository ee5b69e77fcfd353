//! Custom tracing Layer for TUI log capture
//!
//! Captures log events and pushes them to AppState for display in the
//! dashboard's log panel.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::logging::env_filter;

use super::app::{LogEntry, SharedAppState};

/// Counter for logs dropped under lock contention
static DROPPED_LOGS: AtomicU64 = AtomicU64::new(0);

/// Install the TUI subscriber: env filter plus the capture layer
pub fn init(state: SharedAppState) {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(TuiLayer::new(state))
        .init();
}

/// Number of log events dropped so far because the view-state lock was
/// contended
pub fn dropped_logs() -> u64 {
    DROPPED_LOGS.load(Ordering::Relaxed)
}

/// Layer that mirrors log events into the dashboard log panel.
///
/// `on_event()` MUST use `try_lock()` - never `lock()` - because tracing
/// events can fire while another task holds the AppState lock. Dropped
/// entries under contention are counted, not lost silently.
pub struct TuiLayer {
    state: SharedAppState,
}

impl TuiLayer {
    pub fn new(state: SharedAppState) -> Self {
        Self { state }
    }
}

impl<S: Subscriber> Layer<S> for TuiLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();

        // The log panel shows INFO and up; finer levels stay on RUST_LOG
        if level > tracing::Level::INFO {
            return;
        }

        let mut message = String::new();
        let mut extra_fields = Vec::new();
        let mut visitor = MessageVisitor {
            message: &mut message,
            extra_fields: &mut extra_fields,
        };
        event.record(&mut visitor);

        if !extra_fields.is_empty() {
            message.push_str(" [");
            message.push_str(&extra_fields.join(", "));
            message.push(']');
        }

        let entry = LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            level: level.to_string(),
            message,
        };

        match self.state.try_lock() {
            Ok(mut state) => state.push_log(entry),
            Err(_) => {
                DROPPED_LOGS.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Visitor extracting the message and key structured fields
struct MessageVisitor<'a> {
    message: &'a mut String,
    extra_fields: &'a mut Vec<String>,
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = format!("{:?}", value).trim_matches('"').to_string();
        } else if matches!(field.name(), "mode" | "error" | "path") {
            self.extra_fields
                .push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.message = value.to_string();
        } else if matches!(field.name(), "mode" | "error" | "path") {
            self.extra_fields
                .push(format!("{}={}", field.name(), value));
        }
    }
}
