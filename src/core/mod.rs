//! Core dashboard logic: formatting, projection, polling, mode dispatch

pub mod format;
pub mod mode;
pub mod poller;
pub mod render;

pub use format::NumericFormatter;
pub use mode::{Confirmation, ModeChangeOutcome, ModeController, StaticConfirmation};
pub use poller::{
    history_task, poll_history_once, poll_status_once, status_task, HISTORY_POLL_INTERVAL,
    STATUS_POLL_INTERVAL,
};
pub use render::{
    history_body, portfolio_body, status_header, OpTone, PortfolioRow, RoiTone, StatusHeader,
    TableBody, TradeRow, DEVIATION_HIGHLIGHT_PCT, NO_PORTFOLIO_NOTICE, NO_TRADES_NOTICE,
    STATUS_UNAVAILABLE_NOTICE,
};
