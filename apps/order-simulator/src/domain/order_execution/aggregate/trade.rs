//! Trade record: one immutable entry per fill event.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Order;
use crate::domain::order_execution::value_objects::{FillReport, OrderSide};
use crate::domain::shared::{OrderId, StrategyId, Symbol, Timestamp, TradeId};

/// Execution record.
///
/// Stored independently of its order so the ledger survives regardless of
/// order retention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    id: TradeId,
    order_id: OrderId,
    strategy_id: Option<StrategyId>,
    symbol: Symbol,
    side: OrderSide,
    quantity: Decimal,
    price: Decimal,
    commission: Decimal,
    realized_pnl: Decimal,
    executed_at: Timestamp,
    tags: Vec<String>,
}

impl Trade {
    /// Record a fill against `order`.
    ///
    /// Realized PnL is computed downstream and always starts at zero.
    #[must_use]
    pub fn from_fill(order: &Order, fill: &FillReport) -> Self {
        Self {
            id: TradeId::generate(),
            order_id: order.id().clone(),
            strategy_id: order.strategy_id().cloned(),
            symbol: order.symbol().clone(),
            side: order.side(),
            quantity: fill.quantity,
            price: fill.price,
            commission: fill.commission,
            realized_pnl: Decimal::ZERO,
            executed_at: fill.timestamp,
            tags: order.tags().to_vec(),
        }
    }

    /// Trade ID.
    #[must_use]
    pub const fn id(&self) -> &TradeId {
        &self.id
    }

    /// Owning order.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Strategy reference inherited from the order.
    #[must_use]
    pub const fn strategy_id(&self) -> Option<&StrategyId> {
        self.strategy_id.as_ref()
    }

    /// Symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Executed quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Executed price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Commission charged for this execution.
    #[must_use]
    pub const fn commission(&self) -> Decimal {
        self.commission
    }

    /// Realized PnL placeholder.
    #[must_use]
    pub const fn realized_pnl(&self) -> Decimal {
        self.realized_pnl
    }

    /// Execution time.
    #[must_use]
    pub const fn executed_at(&self) -> Timestamp {
        self.executed_at
    }

    /// Tags inherited from the order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Notional value, saturating at the decimal range.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }
}
