//! Reasons for order rejection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an order was rejected at placement.
///
/// Serialized as the human-readable message so that REST consumers and CSV
/// exports see the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Quantity was zero or negative.
    #[serde(rename = "Invalid quantity")]
    InvalidQuantity,
    /// A price was supplied but was not positive.
    #[serde(rename = "Invalid price")]
    InvalidPrice,
    /// Notional value exceeded the configured ceiling.
    #[serde(rename = "Insufficient funds")]
    InsufficientFunds,
    /// Venue is closed.
    #[serde(rename = "Market closed")]
    MarketClosed,
    /// Venue does not trade the symbol.
    #[serde(rename = "Symbol not tradeable")]
    SymbolNotTradeable,
    /// Price outside the venue's band.
    #[serde(rename = "Price limit exceeded")]
    PriceLimitExceeded,
    /// Broker-side risk check.
    #[serde(rename = "Risk management rejection")]
    RiskManagement,
}

impl RejectReason {
    /// Exogenous broker-side reasons used for random rejections.
    pub const OPERATIONAL: [Self; 4] = [
        Self::MarketClosed,
        Self::SymbolNotTradeable,
        Self::PriceLimitExceeded,
        Self::RiskManagement,
    ];

    /// Human-readable message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidQuantity => "Invalid quantity",
            Self::InvalidPrice => "Invalid price",
            Self::InsufficientFunds => "Insufficient funds",
            Self::MarketClosed => "Market closed",
            Self::SymbolNotTradeable => "Symbol not tradeable",
            Self::PriceLimitExceeded => "Price limit exceeded",
            Self::RiskManagement => "Risk management rejection",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
