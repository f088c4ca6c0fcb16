//! Order Execution Aggregates

mod order;
mod trade;

pub use order::Order;
pub use trade::Trade;
