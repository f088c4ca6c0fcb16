//! Fill scenario configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds on the scenario draw and the partial fill fraction range.
///
/// A draw below `full_fill_threshold` fills everything, below
/// `partial_fill_threshold` fills a fraction, otherwise nothing fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillsConfig {
    /// Upper bound of the full-fill band.
    #[serde(default = "default_full_fill_threshold")]
    pub full_fill_threshold: f64,
    /// Upper bound of the partial-fill band.
    #[serde(default = "default_partial_fill_threshold")]
    pub partial_fill_threshold: f64,
    /// Smallest fraction of the remaining quantity a partial fill takes.
    #[serde(default = "default_partial_fraction_min")]
    pub partial_fraction_min: Decimal,
    /// Largest fraction of the remaining quantity a partial fill takes.
    #[serde(default = "default_partial_fraction_max")]
    pub partial_fraction_max: Decimal,
}

impl Default for FillsConfig {
    fn default() -> Self {
        Self {
            full_fill_threshold: default_full_fill_threshold(),
            partial_fill_threshold: default_partial_fill_threshold(),
            partial_fraction_min: default_partial_fraction_min(),
            partial_fraction_max: default_partial_fraction_max(),
        }
    }
}

const fn default_full_fill_threshold() -> f64 {
    0.70
}

const fn default_partial_fill_threshold() -> f64 {
    0.90
}

const fn default_partial_fraction_min() -> Decimal {
    dec!(0.3)
}

const fn default_partial_fraction_max() -> Decimal {
    dec!(0.7)
}
