//! Projection of API payloads into display rows
//!
//! Full replace per cycle: each call rebuilds a complete table body from
//! the freshly parsed payload. Nothing here touches the terminal - the TUI
//! draw layer renders whatever these projections produce, which keeps every
//! display rule testable without a terminal.

use crate::api::{AssetAllocation, HistoryRecord, Mode, StatusSnapshot};

use super::format::NumericFormatter;

/// Rows deviating from target by strictly more than this many percentage
/// points get the highlight treatment
pub const DEVIATION_HIGHLIGHT_PCT: f64 = 5.0;

/// Full-width row shown when the snapshot carries no usable portfolio
pub const NO_PORTFOLIO_NOTICE: &str = "No portfolio data available";

/// Full-width row shown when a status cycle fails outright
pub const STATUS_UNAVAILABLE_NOTICE: &str = "Cannot reach the rebalancer backend";

/// Full-width row shown while the backend has no recorded trades
pub const NO_TRADES_NOTICE: &str = "No trade history recorded yet";

/// A rebuilt table body: either real rows or a single full-width notice
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<R> {
    Notice(String),
    Rows(Vec<R>),
}

impl<R> TableBody<R> {
    pub fn notice(text: &str) -> Self {
        TableBody::Notice(text.to_string())
    }
}

/// Visual tone of the ROI figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiTone {
    /// ROI >= 0
    Positive,
    Negative,
}

/// Visual tone of a trade-operation cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTone {
    /// "buy"
    Affirmative,
    /// "sell" and anything unrecognized
    Warning,
}

/// Header region of the status view
#[derive(Debug, Clone, PartialEq)]
pub struct StatusHeader {
    /// Mode string exactly as reported
    pub mode_label: String,
    /// Parsed mode for styling; `None` leaves the indicator unstyled
    pub mode: Option<Mode>,
    pub last_run: String,
    pub coin_price: String,
    /// Total portfolio value with the quote-currency suffix
    pub total_value: String,
    pub roi: String,
    pub roi_tone: RoiTone,
}

impl StatusHeader {
    /// Placeholder shown until the first successful status cycle
    pub fn placeholder() -> Self {
        Self {
            mode_label: "--".to_string(),
            mode: None,
            last_run: "--".to_string(),
            coin_price: "--".to_string(),
            total_value: "--".to_string(),
            roi: "--".to_string(),
            roi_tone: RoiTone::Positive,
        }
    }
}

/// One row of the portfolio table, fully formatted
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRow {
    pub asset: String,
    pub coin_balance: String,
    pub balance_quote: String,
    pub actual_pct: String,
    pub target_pct: String,
    /// Deviation from target strictly above the threshold
    pub highlighted: bool,
}

/// One row of the trade-history table, fully formatted
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub timestamp: String,
    pub asset: String,
    /// Uppercased operation text
    pub operation: String,
    pub tone: OpTone,
    pub price: String,
    pub amount_quote: String,
    pub coin_amount: String,
    pub deviation: String,
}

/// Project the snapshot's scalar fields into the header region
pub fn status_header(snapshot: &StatusSnapshot, fmt: &NumericFormatter) -> StatusHeader {
    let roi = snapshot.roi.unwrap_or(0.0);

    StatusHeader {
        mode_label: snapshot.mode.clone(),
        mode: snapshot.parsed_mode(),
        last_run: snapshot.last_run.clone(),
        coin_price: fmt.fiat(snapshot.coin_price.unwrap_or(0.0)),
        total_value: format!(
            "{} {}",
            fmt.fiat(snapshot.total_value.unwrap_or(0.0)),
            fmt.quote_asset()
        ),
        roi: fmt.percent(roi),
        roi_tone: if roi >= 0.0 {
            RoiTone::Positive
        } else {
            RoiTone::Negative
        },
    }
}

/// Rebuild the portfolio table body from the snapshot's allocation list
///
/// Absent, malformed, or empty input degrades to the single informative
/// row rather than an empty or broken table.
pub fn portfolio_body(
    portfolio: Option<&[AssetAllocation]>,
    fmt: &NumericFormatter,
) -> TableBody<PortfolioRow> {
    let allocations = match portfolio {
        Some(allocations) if !allocations.is_empty() => allocations,
        _ => return TableBody::notice(NO_PORTFOLIO_NOTICE),
    };

    let rows = allocations
        .iter()
        .map(|allocation| {
            let actual_pct = allocation.actual_pct.unwrap_or(0.0);
            let target_pct = allocation.target_pct.unwrap_or(0.0);
            let deviation = (actual_pct - target_pct).abs();

            PortfolioRow {
                asset: allocation.asset.clone(),
                coin_balance: fmt.amount(&allocation.asset, allocation.coin_balance.unwrap_or(0.0)),
                balance_quote: fmt.fiat(allocation.balance_thb.unwrap_or(0.0)),
                actual_pct: fmt.percent(actual_pct),
                target_pct: fmt.percent(target_pct),
                highlighted: deviation > DEVIATION_HIGHLIGHT_PCT,
            }
        })
        .collect();

    TableBody::Rows(rows)
}

/// Rebuild the trade-history table body, preserving server order
pub fn history_body(trades: Vec<HistoryRecord>, fmt: &NumericFormatter) -> TableBody<TradeRow> {
    if trades.is_empty() {
        return TableBody::notice(NO_TRADES_NOTICE);
    }

    let rows = trades
        .into_iter()
        .map(|trade| {
            let tone = if trade.operation == "buy" {
                OpTone::Affirmative
            } else {
                OpTone::Warning
            };

            TradeRow {
                timestamp: trade.timestamp,
                operation: trade.operation.to_uppercase(),
                tone,
                price: fmt.fiat(trade.price.unwrap_or(0.0)),
                amount_quote: fmt.fiat(trade.amount_thb.unwrap_or(0.0)),
                coin_amount: fmt.amount(&trade.asset, trade.coin_amount.unwrap_or(0.0)),
                deviation: fmt.percent(trade.deviation.unwrap_or(0.0)),
                asset: trade.asset,
            }
        })
        .collect();

    TableBody::Rows(rows)
}

// ============================================================================
// Tests
// ============================================================================
