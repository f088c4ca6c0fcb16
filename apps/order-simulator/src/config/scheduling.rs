//! Timer configuration for fill attempts and the background sweep.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays for the first fill attempt and partial-fill follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Base delay before the first attempt on a MARKET order.
    #[serde(default = "default_market_base_delay_ms")]
    pub market_base_delay_ms: u64,
    /// Base delay before the first attempt on any other order type.
    #[serde(default = "default_other_base_delay_ms")]
    pub other_base_delay_ms: u64,
    /// Upper bound of the uniform jitter added to the base delay.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
    /// Lower bound of the delay before a follow-up attempt.
    #[serde(default = "default_follow_up_min_delay_ms")]
    pub follow_up_min_delay_ms: u64,
    /// Upper bound of the delay before a follow-up attempt.
    #[serde(default = "default_follow_up_max_delay_ms")]
    pub follow_up_max_delay_ms: u64,
    /// Cap on follow-up attempts per order. Unbounded when absent.
    #[serde(default)]
    pub max_follow_up_attempts: Option<u32>,
}

impl SchedulingConfig {
    /// Base delay for the first attempt.
    #[must_use]
    pub const fn base_delay(&self, is_market: bool) -> Duration {
        if is_market {
            Duration::from_millis(self.market_base_delay_ms)
        } else {
            Duration::from_millis(self.other_base_delay_ms)
        }
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            market_base_delay_ms: default_market_base_delay_ms(),
            other_base_delay_ms: default_other_base_delay_ms(),
            jitter_ms: default_jitter_ms(),
            follow_up_min_delay_ms: default_follow_up_min_delay_ms(),
            follow_up_max_delay_ms: default_follow_up_max_delay_ms(),
            max_follow_up_attempts: None,
        }
    }
}

/// Background sweep over resting orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Run the sweep at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sweep period.
    #[serde(default = "default_sweep_interval_ms")]
    pub interval_ms: u64,
    /// Per-order probability of a fill attempt on each sweep.
    #[serde(default = "default_sweep_fill_probability")]
    pub fill_probability: f64,
}

impl SweepConfig {
    /// Sweep period as a `Duration`.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_sweep_interval_ms(),
            fill_probability: default_sweep_fill_probability(),
        }
    }
}

const fn default_market_base_delay_ms() -> u64 {
    1000
}

const fn default_other_base_delay_ms() -> u64 {
    3000
}

const fn default_jitter_ms() -> u64 {
    2000
}

const fn default_follow_up_min_delay_ms() -> u64 {
    5000
}

const fn default_follow_up_max_delay_ms() -> u64 {
    15000
}

const fn default_sweep_interval_ms() -> u64 {
    5000
}

const fn default_sweep_fill_probability() -> f64 {
    0.10
}

const fn default_true() -> bool {
    true
}
