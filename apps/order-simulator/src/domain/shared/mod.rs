//! Shared Kernel
//!
//! Value objects used across the order execution context.

pub mod value_objects;

pub use value_objects::{OrderId, StrategyId, Symbol, Timestamp, TradeId};
