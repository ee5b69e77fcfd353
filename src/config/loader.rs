//! Configuration loader for YAML files
//!
//! Loads and validates the dashboard configuration. The config file path
//! comes from the `DASH_CONFIG` environment variable (default
//! `config.yaml`); `DASH_BASE_URL` and `DASH_QUOTE_ASSET` override the
//! corresponding file values after loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::AppError;

use super::types::DashboardConfig;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "DASH_CONFIG";

/// Environment variable overriding `server.base_url`
pub const BASE_URL_ENV: &str = "DASH_BASE_URL";

/// Environment variable overriding `display.quote_asset`
pub const QUOTE_ASSET_ENV: &str = "DASH_QUOTE_ASSET";

/// Resolve the config file path from the environment
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Returns
/// * `Ok(DashboardConfig)` - Successfully loaded and validated configuration
/// * `Err(AppError)` - File not found, parse error, or validation failure
pub fn load_config(path: &Path) -> Result<DashboardConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut config: DashboardConfig = serde_yaml::from_reader(reader).map_err(|e| {
        AppError::Config(format!("YAML parse error in '{}': {}", path.display(), e))
    })?;

    apply_env_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing)
pub fn load_config_from_str(yaml_content: &str) -> Result<DashboardConfig, AppError> {
    let config: DashboardConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| AppError::Config(format!("YAML parse error: {}", e)))?;

    config.validate()?;

    Ok(config)
}

/// Load the configuration, falling back to defaults when the file is absent
///
/// A missing config file is not an error for the dashboard: it starts
/// against the default local backend. A present-but-invalid file is.
pub fn load_or_default(path: &Path) -> Result<DashboardConfig, AppError> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        let mut config = DashboardConfig::default();
        apply_env_overrides(&mut config);
        config.validate()?;
        return Ok(config);
    }

    load_config(path)
}

fn apply_env_overrides(config: &mut DashboardConfig) {
    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        config.server.base_url = base_url;
    }
    if let Ok(quote_asset) = std::env::var(QUOTE_ASSET_ENV) {
        config.display.quote_asset = quote_asset;
    }
}

// ============================================================================
// Tests
// ============================================================================
