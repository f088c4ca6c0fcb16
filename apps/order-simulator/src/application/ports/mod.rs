//! Application Ports (Driven)
//!
//! Ports define interfaces for the systems the simulator talks to:
//! a source of randomness and the consumers of order-book snapshots.

mod random_source_port;
mod subscriber_port;

pub use random_source_port::RandomSource;
pub use subscriber_port::{OrderBookSubscriber, SubscriberError};
