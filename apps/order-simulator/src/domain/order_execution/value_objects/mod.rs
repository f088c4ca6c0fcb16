//! Order Execution Value Objects
//!
//! Immutable types for order management.

mod fill_report;
mod fill_state;
mod order_request;
mod order_side;
mod order_status;
mod order_type;
mod reasons;

pub use fill_report::FillReport;
pub use fill_state::FillState;
pub use order_request::{OrderChanges, PlaceOrderCommand};
pub use order_side::OrderSide;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use reasons::RejectReason;
