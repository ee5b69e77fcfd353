//! Dashboard rendering
//!
//! Draws whatever the view state holds; all display decisions (formatting,
//! highlighting, notices) were already made by the projection layer. Zones:
//! - Header: mode indicator, last run, coin price, total value, ROI
//! - Portfolio: one row per allocation, deviating rows highlighted
//! - History: one row per trade, operation colored by kind
//! - Logs: recent log entries
//! - Footer: key help, confirmation prompt, or alert

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::api::Mode;
use crate::core::render::{OpTone, RoiTone, TableBody};

use super::app::AppState;

/// Main draw function - renders the entire dashboard
pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(6),    // Portfolio
            Constraint::Length(9), // History
            Constraint::Length(6), // Logs
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    draw_portfolio(frame, chunks[1], state);
    draw_history(frame, chunks[2], state);
    draw_logs(frame, chunks[3], state);
    draw_footer(frame, chunks[4], state);
}

fn mode_style(mode: Option<Mode>) -> Style {
    match mode {
        Some(Mode::DryRun) => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Some(Mode::Production) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        // Unrecognized mode string: shown verbatim, no styling
        None => Style::default().add_modifier(Modifier::BOLD),
    }
}

/// Draw the header: mode + last run on one line, the money row below
fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let header = &state.header;

    let roi_style = match header.roi_tone {
        RoiTone::Positive => Style::default().fg(Color::Green),
        RoiTone::Negative => Style::default().fg(Color::Red),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Mode: "),
            Span::styled(format!(" {} ", header.mode_label), mode_style(header.mode)),
            Span::raw("   Last run: "),
            Span::styled(&header.last_run, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("Price: "),
            Span::styled(&header.coin_price, Style::default().fg(Color::White)),
            Span::raw("   Total: "),
            Span::styled(&header.total_value, Style::default().fg(Color::White)),
            Span::raw("   ROI: "),
            Span::styled(&header.roi, roi_style),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Rebalancer Dashboard"),
    );
    frame.render_widget(widget, area);
}

/// Draw the portfolio table or its full-width notice
fn draw_portfolio(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title("Portfolio");

    match &state.portfolio {
        TableBody::Notice(text) => {
            let widget = Paragraph::new(text.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(widget, area);
        }
        TableBody::Rows(rows) => {
            let header = Row::new(vec![
                Cell::from("Asset"),
                Cell::from("Balance"),
                Cell::from(format!("Value ({})", state.quote_asset)),
                Cell::from("Actual"),
                Cell::from("Target"),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD));

            let table_rows: Vec<Row> = rows
                .iter()
                .map(|row| {
                    let style = if row.highlighted {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Row::new(vec![
                        Cell::from(row.asset.as_str()),
                        Cell::from(row.coin_balance.as_str()),
                        Cell::from(row.balance_quote.as_str()),
                        Cell::from(row.actual_pct.as_str()),
                        Cell::from(row.target_pct.as_str()),
                    ])
                    .style(style)
                })
                .collect();

            let widget = Table::new(
                table_rows,
                [
                    Constraint::Length(8),
                    Constraint::Min(14),
                    Constraint::Min(14),
                    Constraint::Length(10),
                    Constraint::Length(10),
                ],
            )
            .header(header)
            .block(block);
            frame.render_widget(widget, area);
        }
    }
}

/// Draw the trade history table or its full-width notice
fn draw_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title("Trade History");

    match &state.history {
        TableBody::Notice(text) => {
            let widget = Paragraph::new(text.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(widget, area);
        }
        TableBody::Rows(rows) => {
            let header = Row::new(vec![
                Cell::from("Time"),
                Cell::from("Asset"),
                Cell::from("Op"),
                Cell::from("Price"),
                Cell::from("Amount"),
                Cell::from("Coins"),
                Cell::from("Deviation"),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD));

            let table_rows: Vec<Row> = rows
                .iter()
                .map(|row| {
                    let op_color = match row.tone {
                        OpTone::Affirmative => Color::Green,
                        OpTone::Warning => Color::Red,
                    };
                    Row::new(vec![
                        Cell::from(row.timestamp.as_str()),
                        Cell::from(row.asset.as_str()),
                        Cell::from(Span::styled(
                            row.operation.as_str(),
                            Style::default().fg(op_color).add_modifier(Modifier::BOLD),
                        )),
                        Cell::from(row.price.as_str()),
                        Cell::from(row.amount_quote.as_str()),
                        Cell::from(row.coin_amount.as_str()),
                        Cell::from(row.deviation.as_str()),
                    ])
                })
                .collect();

            let widget = Table::new(
                table_rows,
                [
                    Constraint::Length(19),
                    Constraint::Length(7),
                    Constraint::Length(6),
                    Constraint::Min(12),
                    Constraint::Min(12),
                    Constraint::Min(12),
                    Constraint::Length(10),
                ],
            )
            .header(header)
            .block(block);
            frame.render_widget(widget, area);
        }
    }
}

/// Draw recent log entries, newest last
fn draw_logs(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .recent_logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let level_color = match entry.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                _ => Color::DarkGray,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:5} ", entry.level), Style::default().fg(level_color)),
                Span::raw(entry.message.as_str()),
            ]))
        })
        .collect();

    let widget = List::new(items).block(Block::default().borders(Borders::ALL).title("Logs"));
    frame.render_widget(widget, area);
}

/// Draw the footer: confirmation prompt > alert > key help
fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if let Some(target) = state.pending_mode {
        Line::from(Span::styled(
            format!("Switch mode to {}? (y/n)", target.label()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(notice) = &state.notice {
        Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            " q quit | d dry-run | p production ",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::NumericFormatter;
    use crate::core::render::{history_body, portfolio_body, status_header};
    use crate::api::{AssetAllocation, HistoryRecord, StatusSnapshot};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(state: &AppState) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn populated_state() -> AppState {
        let fmt = NumericFormatter::new("THB");
        let snapshot = StatusSnapshot {
            mode: "PRODUCTION".to_string(),
            last_run: "12:30:05".to_string(),
            coin_price: Some(98000.0),
            total_value: Some(150000.0),
            roi: Some(-3.4),
            portfolio: Some(vec![AssetAllocation {
                asset: "BTC".to_string(),
                coin_balance: Some(0.5),
                balance_thb: Some(49000.0),
                actual_pct: Some(12.0),
                target_pct: Some(5.0),
            }]),
        };

        let mut state = AppState::new("THB");
        state.apply_status(
            status_header(&snapshot, &fmt),
            portfolio_body(snapshot.portfolio.as_deref(), &fmt),
        );
        state.apply_history(history_body(
            vec![HistoryRecord {
                timestamp: "2024-05-01 09:00:00".to_string(),
                asset: "BTC".to_string(),
                operation: "buy".to_string(),
                price: Some(98000.0),
                amount_thb: Some(500.0),
                coin_amount: Some(0.0051),
                deviation: Some(6.2),
            }],
            &fmt,
        ));
        state
    }

    #[test]
    fn test_draw_populated_dashboard() {
        let text = rendered_text(&populated_state());
        assert!(text.contains("Rebalancer Dashboard"));
        assert!(text.contains("PRODUCTION"));
        assert!(text.contains("-3.40%"));
        assert!(text.contains("BTC"));
        assert!(text.contains("BUY"));
    }

    #[test]
    fn test_draw_notices() {
        let state = AppState::new("THB");
        let text = rendered_text(&state);
        // Fresh state shows the connectivity notice until the first cycle
        assert!(text.contains("Cannot reach the rebalancer backend"));
    }

    #[test]
    fn test_draw_confirmation_prompt() {
        let mut state = populated_state();
        state.pending_mode = Some(Mode::DryRun);
        let text = rendered_text(&state);
        assert!(text.contains("Switch mode to DRY_RUN? (y/n)"));
    }

    #[test]
    fn test_draw_notice_line() {
        let mut state = populated_state();
        state.notice = Some("Mode change failed; backend state unchanged".to_string());
        let text = rendered_text(&state);
        assert!(text.contains("Mode change failed"));
    }
}
