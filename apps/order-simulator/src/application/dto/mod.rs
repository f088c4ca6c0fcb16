//! Data Transfer Objects (DTOs)
//!
//! Read-side views for API boundaries: summary statistics and CSV exports.

pub mod csv;
mod stats;

pub use csv::{orders_to_csv, trades_to_csv};
pub use stats::OrderBookStats;
