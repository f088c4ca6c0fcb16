//! Order Execution Bounded Context
//!
//! Manages the simulated order lifecycle from placement to a terminal state.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: The root entity owning status and fill accounting
//! - **Fill State**: `quantity = filled + remaining` at every observed point
//! - **Trade**: One immutable record per fill event

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{Order, Trade};
pub use errors::OrderError;
pub use repository::OrderRepository;
pub use services::AdmissionRules;
pub use value_objects::{
    FillReport, FillState, OrderChanges, OrderSide, OrderStatus, OrderType, PlaceOrderCommand,
    RejectReason,
};
