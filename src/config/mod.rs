//! Configuration module for dashboard settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`DashboardConfig`, `ServerConfig`, `DisplayConfig`)
//! - YAML loading with environment overrides (`load_config`, `load_or_default`)
//! - Logging setup (`init_logging`, `log_mode`)

pub mod logging;
mod loader;
mod types;

// Re-export types
pub use types::{DashboardConfig, DisplayConfig, ServerConfig};

// Re-export loader functions
pub use loader::{config_path, load_config, load_config_from_str, load_or_default};

// Re-export logging helpers
pub use logging::{init_logging, log_mode, LogMode};
