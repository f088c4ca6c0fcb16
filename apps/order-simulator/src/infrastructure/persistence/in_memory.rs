//! In-memory order store.

use std::collections::HashMap;

use crate::domain::order_execution::aggregate::{Order, Trade};
use crate::domain::order_execution::repository::OrderRepository;
use crate::domain::order_execution::value_objects::OrderStatus;
use crate::domain::shared::{OrderId, StrategyId};

/// In-memory implementation of `OrderRepository`.
///
/// Orders are kept in placement order with an ID index; nothing is ever
/// removed.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: Vec<Order>,
    index: HashMap<OrderId, usize>,
    trades: Vec<Trade>,
}

impl InMemoryOrderStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the store holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn newest_first(&self, pred: impl Fn(&Order) -> bool) -> Vec<Order> {
        self.orders
            .iter()
            .rev()
            .filter(|&o| pred(o))
            .cloned()
            .collect()
    }
}

impl OrderRepository for InMemoryOrderStore {
    fn insert(&mut self, order: Order) {
        self.index.insert(order.id().clone(), self.orders.len());
        self.orders.push(order);
    }

    fn find_by_id(&self, id: &OrderId) -> Option<&Order> {
        self.index.get(id).and_then(|&i| self.orders.get(i))
    }

    fn find_by_id_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        let i = *self.index.get(id)?;
        self.orders.get_mut(i)
    }

    fn list(&self) -> Vec<Order> {
        self.newest_first(|_| true)
    }

    fn find_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.newest_first(move |o| o.status() == status)
    }

    fn find_active(&self) -> Vec<Order> {
        self.newest_first(|o| o.status().is_active())
    }

    fn find_by_strategy(&self, strategy_id: &StrategyId) -> Vec<Order> {
        self.newest_first(move |o| o.strategy_id() == Some(strategy_id))
    }

    fn pending_ids(&self) -> Vec<OrderId> {
        self.orders
            .iter()
            .filter(|o| o.status() == OrderStatus::Pending)
            .map(|o| o.id().clone())
            .collect()
    }

    fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    fn trades(&self) -> Vec<Trade> {
        self.trades.iter().rev().cloned().collect()
    }

    fn trades_for_order(&self, id: &OrderId) -> Vec<Trade> {
        self.trades
            .iter()
            .filter(|t| t.order_id() == id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::value_objects::{
        FillReport, OrderSide, PlaceOrderCommand, RejectReason,
    };
    use rust_decimal_macros::dec;

    fn market(symbol: &str) -> Order {
        Order::new(PlaceOrderCommand::market(symbol, OrderSide::Buy, dec!(10)))
    }

    #[test]
    fn insert_and_find_by_id() {
        let mut store = InMemoryOrderStore::new();
        let order = market("AAPL");
        let id = order.id().clone();

        store.insert(order);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(&id).map(|o| o.symbol().as_str()), Some("AAPL"));
        assert!(store.find_by_id(&OrderId::new("ord-missing")).is_none());
    }

    #[test]
    fn list_is_newest_first() {
        let mut store = InMemoryOrderStore::new();
        for symbol in ["A", "B", "C"] {
            store.insert(market(symbol));
        }

        let symbols: Vec<String> = store
            .list()
            .iter()
            .map(|o| o.symbol().to_string())
            .collect();
        assert_eq!(symbols, ["C", "B", "A"]);
    }

    #[test]
    fn status_queries() {
        let mut store = InMemoryOrderStore::new();
        let pending = market("A");
        let pending_id = pending.id().clone();
        store.insert(pending);

        let mut cancelled = market("B");
        cancelled.cancel().unwrap();
        store.insert(cancelled);

        store.insert(Order::rejected(
            PlaceOrderCommand::market("C", OrderSide::Sell, dec!(0)),
            RejectReason::InvalidQuantity,
        ));

        assert_eq!(store.find_active().len(), 1);
        assert_eq!(store.find_by_status(OrderStatus::Cancelled).len(), 1);
        assert_eq!(store.find_by_status(OrderStatus::Rejected).len(), 1);
        assert_eq!(store.pending_ids(), vec![pending_id]);
    }

    #[test]
    fn mutation_through_find_by_id_mut_is_visible() {
        let mut store = InMemoryOrderStore::new();
        let order = market("AAPL");
        let id = order.id().clone();
        store.insert(order);

        let trade = store
            .find_by_id_mut(&id)
            .unwrap()
            .apply_fill(FillReport::new(dec!(4), dec!(100), dec!(0.04)))
            .unwrap();
        store.record_trade(trade);

        assert_eq!(
            store.find_by_id(&id).map(Order::status),
            Some(OrderStatus::PartiallyFilled)
        );
        assert_eq!(store.trades_for_order(&id).len(), 1);
        assert!(store.pending_ids().is_empty());
    }

    #[test]
    fn strategy_filter() {
        let mut store = InMemoryOrderStore::new();
        store.insert(Order::new(
            PlaceOrderCommand::market("A", OrderSide::Buy, dec!(1)).with_strategy("momentum"),
        ));
        store.insert(market("B"));

        let found = store.find_by_strategy(&StrategyId::new("momentum"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].symbol().as_str(), "A");
    }
}
