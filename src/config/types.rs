//! Configuration types for the dashboard client
//!
//! This module defines the configuration structs loaded from YAML. Poll
//! cadences and the deviation highlight threshold are compile-time constants
//! (see `core::poller` and `core::render`), not configuration: the backend
//! contract fixes them.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the rebalancer backend (e.g., "http://127.0.0.1:8080")
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Quote-currency code; balances and prices are denominated in it.
    /// Portfolio rows whose asset equals this code format as fiat.
    pub quote_asset: String,
}

/// Root dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub display: DisplayConfig,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            quote_asset: "THB".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.base_url.trim().is_empty() {
            return Err(AppError::Config("server.base_url cannot be empty".to_string()));
        }

        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "server.base_url must start with http:// or https:// (got '{}')",
                self.server.base_url
            )));
        }

        if self.server.timeout_secs == 0 || self.server.timeout_secs > 120 {
            return Err(AppError::Config(format!(
                "server.timeout_secs must be 1-120, got {}",
                self.server.timeout_secs
            )));
        }

        if self.display.quote_asset.trim().is_empty() {
            return Err(AppError::Config("display.quote_asset cannot be empty".to_string()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
