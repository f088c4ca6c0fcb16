//! Configuration module for the order simulator.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for every simulator component. Every section has defaults,
//! so an empty document is a valid configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_simulator::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Or start from the defaults
//! let config = Config::default();
//! println!("reference price: {}", config.pricing.reference_price);
//! ```

mod admission;
mod fills;
mod observability;
mod pricing;
mod scheduling;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use admission::AdmissionConfig;
pub use fills::FillsConfig;
pub use observability::{LogFormat, LoggingConfig, NotificationsConfig};
pub use pricing::PricingConfig;
pub use scheduling::{SchedulingConfig, SweepConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fill pricing.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Placement validation.
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Fill attempt timers.
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    /// Background sweep.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Fill scenarios.
    #[serde(default)]
    pub fills: FillsConfig,
    /// Snapshot fan-out.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset variables
/// without a default become empty.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn ensure(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(message.to_string()))
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first offending field.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let pricing = &config.pricing;
    ensure(
        pricing.reference_price > Decimal::ZERO,
        "pricing.reference_price must be positive",
    )?;
    ensure(
        pricing.commission_rate >= Decimal::ZERO,
        "pricing.commission_rate must not be negative",
    )?;
    ensure(
        pricing.slippage_min >= Decimal::ZERO && pricing.slippage_min <= pricing.slippage_max,
        "pricing.slippage_min must be between 0 and pricing.slippage_max",
    )?;

    let admission = &config.admission;
    ensure(
        admission.max_notional > Decimal::ZERO,
        "admission.max_notional must be positive",
    )?;
    ensure(
        is_probability(admission.random_rejection_probability),
        "admission.random_rejection_probability must be between 0.0 and 1.0",
    )?;

    let scheduling = &config.scheduling;
    ensure(
        scheduling.follow_up_min_delay_ms <= scheduling.follow_up_max_delay_ms,
        "scheduling.follow_up_min_delay_ms must not exceed follow_up_max_delay_ms",
    )?;

    let sweep = &config.sweep;
    ensure(
        !sweep.enabled || sweep.interval_ms > 0,
        "sweep.interval_ms must be positive when the sweep is enabled",
    )?;
    ensure(
        is_probability(sweep.fill_probability),
        "sweep.fill_probability must be between 0.0 and 1.0",
    )?;

    let fills = &config.fills;
    ensure(
        is_probability(fills.full_fill_threshold)
            && is_probability(fills.partial_fill_threshold)
            && fills.full_fill_threshold <= fills.partial_fill_threshold,
        "fills thresholds must satisfy 0.0 <= full_fill_threshold <= partial_fill_threshold <= 1.0",
    )?;
    ensure(
        fills.partial_fraction_min >= Decimal::ZERO
            && fills.partial_fraction_min <= fills.partial_fraction_max
            && fills.partial_fraction_max <= Decimal::ONE,
        "fills partial fraction range must satisfy 0 <= min <= max <= 1",
    )?;

    ensure(
        config.notifications.channel_capacity > 0,
        "notifications.channel_capacity must be positive",
    )?;

    Ok(())
}
