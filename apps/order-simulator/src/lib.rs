// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Simulator - Rust Core Library
//!
//! In-memory order execution simulator: orders placed here are admitted or
//! rejected, then filled, partially filled, or left resting on randomized
//! Tokio timers, with slippage, commission, and average-price accounting.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `order_execution`: Order aggregate, fill accounting, trades, pricing, admission rules
//!
//! - **Application**: Orchestration
//!   - `ports`: `RandomSource`, `OrderBookSubscriber`
//!   - `services`: `OrderSimulator`, scheduler, fill engine, notification bus
//!   - `dto`: Statistics and CSV exports
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: In-memory order store
//!   - `random`: Thread, seeded, and scripted random sources
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use order_simulator::{Config, OrderSimulator, OrderSide, PlaceOrderCommand, ThreadRandomSource};
//! use rust_decimal_macros::dec;
//!
//! let simulator = OrderSimulator::new(Config::default(), Arc::new(ThreadRandomSource))?;
//! let order = simulator.place_order(PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(100)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Simulator services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

pub mod config;
pub mod error;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_execution::{
    aggregate::{Order, Trade},
    errors::OrderError,
    value_objects::{
        OrderChanges, OrderSide, OrderStatus, OrderType, PlaceOrderCommand, RejectReason,
    },
};
pub use domain::shared::{OrderId, StrategyId, Symbol, Timestamp, TradeId};

// Application re-exports
pub use application::dto::OrderBookStats;
pub use application::ports::{OrderBookSubscriber, RandomSource, SubscriberError};
pub use application::services::{OrderBookSnapshot, OrderSimulator, Subscription};

// Infrastructure re-exports
pub use infrastructure::persistence::InMemoryOrderStore;
pub use infrastructure::random::{ScriptedRandomSource, SeededRandomSource, ThreadRandomSource};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use error::SimulatorError;
