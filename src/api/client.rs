//! HTTP client for the rebalancer backend
//!
//! One shared `reqwest::Client` with a per-request timeout issues the three
//! backend calls. Transport failures surface as `AppError::Network`,
//! malformed bodies as `AppError::Payload`, and non-success statuses as
//! `AppError::Api` - the pollers treat all three the same way.

use std::time::Duration;

use tracing::debug;

use crate::config::ServerConfig;
use crate::error::{AppError, Result};

use super::types::{HistoryResponse, Mode, StatusSnapshot};

/// Client for the rebalancer backend HTTP API
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// Build a client from server configuration
    pub fn new(config: &ServerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Base URL the client talks to (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/status` - fetch the current-state snapshot
    pub async fn fetch_status(&self) -> Result<StatusSnapshot> {
        let url = format!("{}/api/status", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(format!("status endpoint returned {}", status)));
        }

        let body = response.text().await?;
        let snapshot: StatusSnapshot = serde_json::from_str(&body)?;
        debug!(mode = %snapshot.mode, "Status snapshot fetched");
        Ok(snapshot)
    }

    /// `GET /api/history` - fetch the recent trade list
    pub async fn fetch_history(&self) -> Result<HistoryResponse> {
        let url = format!("{}/api/history", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(format!("history endpoint returned {}", status)));
        }

        let body = response.text().await?;
        let history: HistoryResponse = serde_json::from_str(&body)?;
        debug!(
            trades = history.trades.as_ref().map(Vec::len).unwrap_or(0),
            "Trade history fetched"
        );
        Ok(history)
    }

    /// `POST /api/mode/{mode}` - switch the backend operating mode
    ///
    /// No request body; the response body is ignored beyond success/failure.
    pub async fn set_mode(&self, target: Mode) -> Result<()> {
        let url = format!("{}/api/mode/{}", self.base_url, target.path_segment());
        let response = self.http.post(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(format!("mode change rejected: {}", status)));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
