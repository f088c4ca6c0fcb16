//! Order Repository Trait
//!
//! Defines the storage abstraction for orders and their trades.
//! Implemented by adapters in the infrastructure layer.

use super::aggregate::{Order, Trade};
use super::value_objects::OrderStatus;
use crate::domain::shared::{OrderId, StrategyId};

/// Repository trait for orders and the trade ledger.
///
/// Callers serialize access (the simulator holds it behind a mutex), so
/// methods take `&self`/`&mut self` directly. Query methods return owned
/// snapshots.
pub trait OrderRepository: Send {
    /// Store a newly placed order.
    fn insert(&mut self, order: Order);

    /// Borrow an order by ID.
    fn find_by_id(&self, id: &OrderId) -> Option<&Order>;

    /// Mutably borrow an order by ID.
    fn find_by_id_mut(&mut self, id: &OrderId) -> Option<&mut Order>;

    /// All orders, most recently placed first.
    fn list(&self) -> Vec<Order>;

    /// Orders with the given status, most recently placed first.
    fn find_by_status(&self, status: OrderStatus) -> Vec<Order>;

    /// Orders still working (`Pending` or `PartiallyFilled`), most recently
    /// placed first.
    fn find_active(&self) -> Vec<Order>;

    /// Orders placed by a strategy, most recently placed first.
    fn find_by_strategy(&self, strategy_id: &StrategyId) -> Vec<Order>;

    /// IDs of `Pending` orders in placement order.
    fn pending_ids(&self) -> Vec<OrderId>;

    /// Append a trade to the ledger.
    fn record_trade(&mut self, trade: Trade);

    /// All trades, most recent first.
    fn trades(&self) -> Vec<Trade>;

    /// Trades for one order, in execution order.
    fn trades_for_order(&self, id: &OrderId) -> Vec<Trade>;
}
