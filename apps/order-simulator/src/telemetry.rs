//! Tracing Setup
//!
//! Initializes the `tracing` subscriber from [`LoggingConfig`].
//!
//! # Configuration
//!
//! - `RUST_LOG`: overrides the configured level when set
//! - `logging.format`: `text` for human-readable lines, `json` for one object per line
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_simulator::telemetry::init_tracing;
//!
//! let config = load_config(None)?;
//! init_tracing(&config.logging);
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed (for example by a
/// test harness); the existing one is left in place.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.with_target(true).try_init(),
    };

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
