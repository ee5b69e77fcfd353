//! Wire types for the rebalancer backend API
//!
//! Deserialization is deliberately tolerant: the dashboard must keep
//! rendering whatever the backend sends. Numeric fields are optional and
//! default to zero at projection time; an unrecognized `mode` string or a
//! malformed `portfolio` field never fails the whole snapshot.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Operating mode of the rebalancing backend
///
/// Parsed from the snapshot's `mode` string for styling and used to build
/// the mode-change command path. Unrecognized mode strings parse to `None`
/// and simply get no mode-specific styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Production,
}

impl Mode {
    /// Canonical display label, as the backend reports it
    pub fn label(self) -> &'static str {
        match self {
            Mode::DryRun => "DRY_RUN",
            Mode::Production => "PRODUCTION",
        }
    }

    /// Lowercase path segment for `POST /api/mode/{mode}`
    pub fn path_segment(self) -> &'static str {
        match self {
            Mode::DryRun => "dry_run",
            Mode::Production => "production",
        }
    }

    /// Case-insensitive parse of a mode label
    pub fn parse_label(label: &str) -> Option<Mode> {
        match label.trim().to_ascii_uppercase().as_str() {
            "DRY_RUN" => Some(Mode::DryRun),
            "PRODUCTION" => Some(Mode::Production),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One asset line of the portfolio table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetAllocation {
    #[serde(default)]
    pub asset: String,
    #[serde(default)]
    pub coin_balance: Option<f64>,
    #[serde(default)]
    pub balance_thb: Option<f64>,
    #[serde(default)]
    pub actual_pct: Option<f64>,
    #[serde(default)]
    pub target_pct: Option<f64>,
}

/// Current-state snapshot from `GET /api/status`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSnapshot {
    /// Raw mode string, displayed verbatim
    #[serde(default)]
    pub mode: String,
    /// Opaque timestamp string, displayed verbatim
    #[serde(default)]
    pub last_run: String,
    #[serde(default)]
    pub coin_price: Option<f64>,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub roi: Option<f64>,
    /// Delivered order is render order. `None` when absent, null, or not
    /// a JSON array of allocations.
    #[serde(default, deserialize_with = "lenient_allocations")]
    pub portfolio: Option<Vec<AssetAllocation>>,
}

impl StatusSnapshot {
    /// Parsed operating mode, if the label is recognized
    pub fn parsed_mode(&self) -> Option<Mode> {
        Mode::parse_label(&self.mode)
    }
}

/// One executed trade from `GET /api/history`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub asset: String,
    /// "buy" keys the affirmative tone; any other value the warning tone
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub amount_thb: Option<f64>,
    #[serde(default)]
    pub coin_amount: Option<f64>,
    #[serde(default)]
    pub deviation: Option<f64>,
}

/// Envelope of `GET /api/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub trades: Option<Vec<HistoryRecord>>,
}

/// Accept a well-formed allocation array, map anything else to `None`
fn lenient_allocations<'de, D>(deserializer: D) -> Result<Option<Vec<AssetAllocation>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or(None))
}

// ============================================================================
// Tests
// ============================================================================
