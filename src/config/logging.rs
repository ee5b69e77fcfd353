//! Logging configuration for the dashboard
//!
//! # Environment Variables
//! - `LOG_FORMAT`: Output format - `tui` (default), `pretty`, or `json`.
//!   `tui` routes log events into the dashboard's log panel; the other two
//!   run the client headless with stdout logging.
//! - `RUST_LOG`: Log level filter (default: `info`)

use tracing_subscriber::EnvFilter;

/// Selected logging/output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Terminal dashboard; logs captured into the TUI log panel
    Tui,
    /// Headless, human-readable stdout logs
    Pretty,
    /// Headless, machine-parseable JSON stdout logs
    Json,
}

/// Read `LOG_FORMAT` and resolve the output mode (default: tui)
pub fn log_mode() -> LogMode {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => LogMode::Json,
        Ok("pretty") => LogMode::Pretty,
        _ => LogMode::Tui,
    }
}

/// Build the env filter, respecting `RUST_LOG` (default: `info`)
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize stdout logging for the headless modes
///
/// TUI-mode initialization lives in `tui::logging` because it needs the
/// shared view state.
pub fn init_logging(mode: LogMode) {
    match mode {
        LogMode::Pretty => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .pretty()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .json()
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_log_mode_defaults_to_tui() {
        std::env::remove_var("LOG_FORMAT");
        assert_eq!(log_mode(), LogMode::Tui);
    }

    #[test]
    #[serial]
    fn test_log_mode_json() {
        std::env::set_var("LOG_FORMAT", "json");
        assert_eq!(log_mode(), LogMode::Json);
        std::env::remove_var("LOG_FORMAT");
    }

    #[test]
    #[serial]
    fn test_log_mode_pretty() {
        std::env::set_var("LOG_FORMAT", "pretty");
        assert_eq!(log_mode(), LogMode::Pretty);
        std::env::remove_var("LOG_FORMAT");
    }

    #[test]
    #[serial]
    fn test_log_mode_unknown_falls_back_to_tui() {
        std::env::set_var("LOG_FORMAT", "syslog");
        assert_eq!(log_mode(), LogMode::Tui);
        std::env::remove_var("LOG_FORMAT");
    }
}
