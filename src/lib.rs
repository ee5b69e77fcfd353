//! Rebalancer Dashboard - Terminal Client
//!
//! Live status dashboard for the portfolio-rebalancing backend:
//! - Polls the current-state snapshot every second
//! - Polls the trade history every 30 seconds
//! - Rebuilds the display from scratch on every successful cycle
//! - Switches the backend operating mode after operator confirmation

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod tui;

pub use error::{AppError, Result};
