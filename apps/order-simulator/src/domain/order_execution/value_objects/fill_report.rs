//! Fill report produced by the fill engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;

/// A single simulated execution against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillReport {
    /// Quantity filled in this execution.
    pub quantity: Decimal,
    /// Price at which this fill occurred.
    pub price: Decimal,
    /// Commission charged for this fill.
    pub commission: Decimal,
    /// Timestamp of the fill.
    pub timestamp: Timestamp,
}

impl FillReport {
    /// Create a new fill report timestamped now.
    #[must_use]
    pub fn new(quantity: Decimal, price: Decimal, commission: Decimal) -> Self {
        Self {
            quantity,
            price,
            commission,
            timestamp: Timestamp::now(),
        }
    }

    /// Notional value of this fill, saturating at the decimal range.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }
}
