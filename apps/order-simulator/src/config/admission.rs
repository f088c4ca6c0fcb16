//! Admission (placement validation) configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Admission configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Maximum notional value of a single order.
    #[serde(default = "default_max_notional")]
    pub max_notional: Decimal,
    /// Probability that an otherwise valid order is rejected by the venue.
    #[serde(default = "default_random_rejection_probability")]
    pub random_rejection_probability: f64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_notional: default_max_notional(),
            random_rejection_probability: default_random_rejection_probability(),
        }
    }
}

const fn default_max_notional() -> Decimal {
    dec!(1_000_000)
}

const fn default_random_rejection_probability() -> f64 {
    0.05
}
