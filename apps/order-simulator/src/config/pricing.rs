//! Fill pricing configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Pricing configuration for simulated fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price used when an order carries no limit price.
    #[serde(default = "default_reference_price")]
    pub reference_price: Decimal,
    /// Commission charged per unit of notional.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
    /// Lower bound of market-order slippage, as a fraction of price.
    #[serde(default = "default_slippage_min")]
    pub slippage_min: Decimal,
    /// Upper bound of market-order slippage, as a fraction of price.
    #[serde(default = "default_slippage_max")]
    pub slippage_max: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            reference_price: default_reference_price(),
            commission_rate: default_commission_rate(),
            slippage_min: default_slippage_min(),
            slippage_max: default_slippage_max(),
        }
    }
}

const fn default_reference_price() -> Decimal {
    dec!(1000)
}

const fn default_commission_rate() -> Decimal {
    dec!(0.0001)
}

const fn default_slippage_min() -> Decimal {
    dec!(0.001)
}

const fn default_slippage_max() -> Decimal {
    dec!(0.005)
}
