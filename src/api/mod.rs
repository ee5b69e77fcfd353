//! Backend API surface: wire types and the HTTP client

mod client;
mod types;

pub use client::BackendClient;
pub use types::{AssetAllocation, HistoryRecord, HistoryResponse, Mode, StatusSnapshot};
