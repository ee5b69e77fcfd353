//! Locale-consistent numeric formatting with asset-specific precision
//!
//! Two profiles mirror the backend's display conventions:
//! - fiat: exactly 2 fractional digits, comma-grouped (en-US style)
//! - coin: 2 to 8 fractional digits, trailing zeros beyond 2 trimmed
//!
//! Percent values are always 2 fractional digits plus a `%` literal,
//! independent of the profiles. Non-finite inputs format as zero; callers
//! map absent wire values to zero before formatting.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

/// Fractional digits of the fiat profile (also the coin-profile minimum)
pub const FIAT_DECIMALS: u32 = 2;

/// Maximum fractional digits of the coin profile
pub const COIN_MAX_DECIMALS: u32 = 8;

/// Formatter configured for one quote currency
///
/// Constructed once and shared; which profile an amount gets depends on
/// whether its asset symbol equals the quote-currency code.
#[derive(Debug, Clone)]
pub struct NumericFormatter {
    quote_asset: String,
}

impl NumericFormatter {
    pub fn new(quote_asset: impl Into<String>) -> Self {
        Self {
            quote_asset: quote_asset.into(),
        }
    }

    /// Quote-currency code this formatter was configured with
    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    /// Fiat profile: exactly 2 fractional digits, grouped
    pub fn fiat(&self, value: f64) -> String {
        let mut d = to_decimal(value).round_dp_with_strategy(
            FIAT_DECIMALS,
            RoundingStrategy::MidpointAwayFromZero,
        );
        d.rescale(FIAT_DECIMALS);
        grouped(d)
    }

    /// Coin profile: 2-8 fractional digits, trailing zeros beyond 2 trimmed
    pub fn coin(&self, value: f64) -> String {
        let mut d = to_decimal(value)
            .round_dp_with_strategy(COIN_MAX_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        if d.scale() < FIAT_DECIMALS {
            d.rescale(FIAT_DECIMALS);
        }
        grouped(d)
    }

    /// Profile dispatch keyed on the asset symbol: quote-currency rows are
    /// fiat, everything else is coin
    pub fn amount(&self, asset: &str, value: f64) -> String {
        if asset == self.quote_asset {
            self.fiat(value)
        } else {
            self.coin(value)
        }
    }

    /// Percent rule: exactly 2 fractional digits plus a trailing `%`
    pub fn percent(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        format!("{:.2}%", value)
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Render a decimal with comma-grouped integer digits
fn grouped(d: Decimal) -> String {
    let plain = d.to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3);
    out.push_str(sign);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
