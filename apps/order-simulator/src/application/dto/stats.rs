//! Order-book summary statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::aggregate::{Order, Trade};
use crate::domain::order_execution::value_objects::OrderStatus;

/// Counts and totals over the whole order book and trade ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookStats {
    /// All orders ever placed, including rejected ones.
    pub total_orders: usize,
    /// Orders in `PENDING`.
    pub pending: usize,
    /// Orders in `PARTIALLY_FILLED`.
    pub partially_filled: usize,
    /// Orders in `FILLED`.
    pub filled: usize,
    /// Orders in `CANCELLED`.
    pub cancelled: usize,
    /// Orders in `REJECTED`.
    pub rejected: usize,
    /// Trades in the ledger.
    pub total_trades: usize,
    /// Sum of commission over all trades.
    pub total_commission: Decimal,
    /// Sum of `quantity × price` over all trades.
    pub filled_notional: Decimal,
}

impl OrderBookStats {
    /// Summarize orders and trades.
    #[must_use]
    pub fn from_ledger(orders: &[Order], trades: &[Trade]) -> Self {
        let mut stats = Self {
            total_orders: orders.len(),
            total_trades: trades.len(),
            ..Self::default()
        };

        for order in orders {
            match order.status() {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::PartiallyFilled => stats.partially_filled += 1,
                OrderStatus::Filled => stats.filled += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
                OrderStatus::Rejected => stats.rejected += 1,
            }
        }

        for trade in trades {
            stats.total_commission = stats.total_commission.saturating_add(trade.commission());
            stats.filled_notional = stats.filled_notional.saturating_add(trade.notional());
        }

        stats
    }

    /// Orders still working.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.pending + self.partially_filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::value_objects::{
        FillReport, OrderSide, PlaceOrderCommand, RejectReason,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn summarizes_orders_and_trades() {
        let mut filled = Order::new(PlaceOrderCommand::market("A", OrderSide::Buy, dec!(10)));
        let t1 = filled
            .apply_fill(FillReport::new(dec!(4), dec!(100), dec!(0.04)))
            .unwrap();
        let t2 = filled
            .apply_fill(FillReport::new(dec!(6), dec!(101), dec!(0.0606)))
            .unwrap();
        let pending = Order::new(PlaceOrderCommand::market("B", OrderSide::Sell, dec!(1)));
        let rejected = Order::rejected(
            PlaceOrderCommand::market("C", OrderSide::Sell, dec!(0)),
            RejectReason::InvalidQuantity,
        );

        let stats = OrderBookStats::from_ledger(&[filled, pending, rejected], &[t1, t2]);

        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.filled, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.active(), 1);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.total_commission, dec!(0.1006));
        assert_eq!(stats.filled_notional, dec!(1006));
    }

    #[test]
    fn empty_ledger() {
        assert_eq!(OrderBookStats::from_ledger(&[], &[]), OrderBookStats::default());
    }
}
