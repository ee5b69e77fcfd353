//! Dashboard view state
//!
//! Shared state container the poll cycles render into and the draw layer
//! reads from. Wrapped in Arc<Mutex<>> for safe sharing between tasks.
//! Every region is replaced wholesale by its producer - there is no
//! incremental merging across cycles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::Mode;
use crate::core::render::{
    PortfolioRow, StatusHeader, TableBody, TradeRow, STATUS_UNAVAILABLE_NOTICE,
};

/// Maximum number of log entries to keep in memory
pub const MAX_LOG_ENTRIES: usize = 100;

/// Type alias for shared view-state access across tasks
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Single log entry for the dashboard log panel
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Central view state shared between the pollers, the mode controller and
/// the draw loop
#[derive(Debug)]
pub struct AppState {
    /// Quote-currency code, shown in the portfolio column titles
    pub quote_asset: String,

    /// Header region: mode indicator, last run, price, total value, ROI.
    /// Only replaced on a successful status cycle.
    pub header: StatusHeader,

    /// Portfolio table body, replaced every status cycle
    pub portfolio: TableBody<PortfolioRow>,

    /// History table body, replaced only by successful history cycles
    pub history: TableBody<TradeRow>,

    /// Mode change awaiting operator confirmation
    pub pending_mode: Option<Mode>,

    /// User-visible alert line (e.g. a failed mode change)
    pub notice: Option<String>,

    /// Logs (ring buffer)
    pub recent_logs: VecDeque<LogEntry>,

    /// Control
    pub should_quit: bool,
}

impl AppState {
    pub fn new(quote_asset: impl Into<String>) -> Self {
        Self {
            quote_asset: quote_asset.into(),
            header: StatusHeader::placeholder(),
            portfolio: TableBody::notice(STATUS_UNAVAILABLE_NOTICE),
            history: TableBody::Rows(Vec::new()),
            pending_mode: None,
            notice: None,
            recent_logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            should_quit: false,
        }
    }

    /// Wrap into the shared handle used by the tasks
    pub fn into_shared(self) -> SharedAppState {
        Arc::new(Mutex::new(self))
    }

    /// Apply a successful status cycle: header and portfolio replaced
    pub fn apply_status(&mut self, header: StatusHeader, portfolio: TableBody<PortfolioRow>) {
        self.header = header;
        self.portfolio = portfolio;
    }

    /// Apply a failed status cycle: the portfolio body becomes the
    /// connectivity notice, the header keeps its last-known values
    pub fn mark_status_unavailable(&mut self) {
        self.portfolio = TableBody::notice(STATUS_UNAVAILABLE_NOTICE);
    }

    /// Apply a successful history cycle (failed cycles apply nothing)
    pub fn apply_history(&mut self, history: TableBody<TradeRow>) {
        self.history = history;
    }

    /// Add a log entry with automatic rotation
    pub fn push_log(&mut self, entry: LogEntry) {
        if self.recent_logs.len() >= MAX_LOG_ENTRIES {
            self.recent_logs.pop_front();
        }
        self.recent_logs.push_back(entry);
    }
}

// ============================================================================
// Tests
// ============================================================================
