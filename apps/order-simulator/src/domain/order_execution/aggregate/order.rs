//! Order Aggregate Root
//!
//! The Order aggregate owns its status and fill accounting. Only fills,
//! cancellation and modification mutate it; terminal orders are kept for
//! audit and export.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Trade;
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::value_objects::{
    FillReport, FillState, OrderChanges, OrderSide, OrderStatus, OrderType, PlaceOrderCommand,
    RejectReason,
};
use crate::domain::shared::{OrderId, StrategyId, Symbol, Timestamp};

/// Order Aggregate Root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    symbol: Symbol,
    side: OrderSide,
    #[serde(rename = "type")]
    order_type: OrderType,
    price: Option<Decimal>,
    stop_price: Option<Decimal>,
    strategy_id: Option<StrategyId>,
    tags: Vec<String>,
    status: OrderStatus,
    #[serde(flatten)]
    fill: FillState,
    rejection_reason: Option<RejectReason>,
    created_at: Timestamp,
    updated_at: Timestamp,
    filled_at: Option<Timestamp>,
}

impl Order {
    /// Create an admitted order in `Pending` status.
    #[must_use]
    pub fn new(cmd: PlaceOrderCommand) -> Self {
        let now = Timestamp::now();

        Self {
            id: OrderId::generate(),
            symbol: cmd.symbol,
            side: cmd.side,
            order_type: cmd.order_type,
            price: cmd.price,
            stop_price: cmd.stop_price,
            strategy_id: cmd.strategy_id,
            tags: cmd.tags,
            status: OrderStatus::Pending,
            fill: FillState::new(cmd.quantity),
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            filled_at: None,
        }
    }

    /// Create an order that was refused at placement.
    ///
    /// Rejected orders are stored like any other so that attempted
    /// placements can be audited.
    #[must_use]
    pub fn rejected(cmd: PlaceOrderCommand, reason: RejectReason) -> Self {
        let mut order = Self::new(cmd);
        order.status = OrderStatus::Rejected;
        order.rejection_reason = Some(reason);
        order
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Get the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Get the current order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.fill.quantity()
    }

    /// Get the limit price.
    #[must_use]
    pub const fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Get the stop price.
    #[must_use]
    pub const fn stop_price(&self) -> Option<Decimal> {
        self.stop_price
    }

    /// Get the strategy reference.
    #[must_use]
    pub const fn strategy_id(&self) -> Option<&StrategyId> {
        self.strategy_id.as_ref()
    }

    /// Get the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the fill accounting.
    #[must_use]
    pub const fn fill_state(&self) -> &FillState {
        &self.fill
    }

    /// Cumulative filled quantity.
    #[must_use]
    pub const fn filled_quantity(&self) -> Decimal {
        self.fill.filled_quantity()
    }

    /// Quantity still open.
    #[must_use]
    pub const fn remaining_quantity(&self) -> Decimal {
        self.fill.remaining_quantity()
    }

    /// Volume-weighted average fill price.
    #[must_use]
    pub const fn avg_fill_price(&self) -> Option<Decimal> {
        self.fill.avg_fill_price()
    }

    /// Total commission charged.
    #[must_use]
    pub const fn commission(&self) -> Decimal {
        self.fill.commission()
    }

    /// Why the order was rejected, if it was.
    #[must_use]
    pub const fn rejection_reason(&self) -> Option<RejectReason> {
        self.rejection_reason
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Get the completion timestamp.
    #[must_use]
    pub const fn filled_at(&self) -> Option<Timestamp> {
        self.filled_at
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Apply a fill and produce the matching trade record.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not working or the fill quantity is
    /// invalid for what remains.
    pub fn apply_fill(&mut self, fill: FillReport) -> Result<Trade, OrderError> {
        if !self.status.is_active() {
            return Err(OrderError::CannotFill {
                status: self.status,
            });
        }

        self.fill.apply(&fill)?;

        if self.fill.is_complete() {
            self.status = OrderStatus::Filled;
            self.filled_at = Some(fill.timestamp);
        } else {
            self.status = OrderStatus::PartiallyFilled;
        }
        self.updated_at = fill.timestamp;

        Ok(Trade::from_fill(self, &fill))
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns error unless the order is `Pending` or `PartiallyFilled`.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.is_active() {
            return Err(OrderError::CannotCancel {
                status: self.status,
            });
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Modify a working order.
    ///
    /// Price and stop price are replaced directly. A new quantity only takes
    /// effect when it exceeds the filled quantity; otherwise it is ignored
    /// and the rest of the change still applies.
    ///
    /// # Errors
    ///
    /// Returns error unless the order is `Pending` or `PartiallyFilled`, or
    /// if a supplied price is not positive.
    pub fn modify(&mut self, changes: &OrderChanges) -> Result<(), OrderError> {
        if !self.status.is_active() {
            return Err(OrderError::CannotModify {
                status: self.status,
            });
        }

        for (field, value) in [("price", changes.price), ("stop_price", changes.stop_price)] {
            if value.is_some_and(|v| v <= Decimal::ZERO) {
                return Err(OrderError::InvalidParameters {
                    field: field.to_string(),
                    message: "must be positive".to_string(),
                });
            }
        }

        if let Some(price) = changes.price {
            self.price = Some(price);
        }
        if let Some(stop_price) = changes.stop_price {
            self.stop_price = Some(stop_price);
        }
        if let Some(quantity) = changes.quantity {
            // Ignored unless it leaves something to fill.
            let _ = self.fill.resize(quantity);
        }

        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market_buy(qty: Decimal) -> Order {
        Order::new(PlaceOrderCommand::market("AAPL", OrderSide::Buy, qty))
    }

    #[test]
    fn new_order_is_pending_and_unfilled() {
        let order = market_buy(dec!(100));

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.quantity(), dec!(100));
        assert_eq!(order.remaining_quantity(), dec!(100));
        assert_eq!(order.filled_quantity(), Decimal::ZERO);
        assert_eq!(order.filled_at(), None);
        assert_eq!(order.created_at(), order.updated_at());
    }

    #[test]
    fn rejected_order_records_reason() {
        let order = Order::rejected(
            PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(0)),
            RejectReason::InvalidQuantity,
        );

        assert_eq!(order.status(), OrderStatus::Rejected);
        assert_eq!(order.rejection_reason(), Some(RejectReason::InvalidQuantity));
    }

    #[test]
    fn partial_then_full_fill() {
        let mut order = market_buy(dec!(100));

        let trade = order
            .apply_fill(FillReport::new(dec!(40), dec!(1000), dec!(4)))
            .unwrap();
        assert_eq!(order.status(), OrderStatus::PartiallyFilled);
        assert_eq!(trade.quantity(), dec!(40));
        assert_eq!(trade.order_id(), order.id());
        assert_eq!(order.filled_at(), None);

        order
            .apply_fill(FillReport::new(dec!(60), dec!(1010), dec!(6.06)))
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Filled);
        assert_eq!(order.remaining_quantity(), Decimal::ZERO);
        assert!(order.filled_at().is_some());
        assert_eq!(order.avg_fill_price(), Some(dec!(1006)));
        assert_eq!(order.commission(), dec!(10.06));
    }

    #[test]
    fn filled_order_cannot_fill_again() {
        let mut order = market_buy(dec!(10));
        order
            .apply_fill(FillReport::new(dec!(10), dec!(1000), dec!(1)))
            .unwrap();

        let err = order
            .apply_fill(FillReport::new(dec!(1), dec!(1000), dec!(0.1)))
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::CannotFill {
                status: OrderStatus::Filled
            }
        );
    }

    #[test]
    fn cancel_pending_and_partial() {
        let mut pending = market_buy(dec!(10));
        pending.cancel().unwrap();
        assert_eq!(pending.status(), OrderStatus::Cancelled);

        let mut partial = market_buy(dec!(10));
        partial
            .apply_fill(FillReport::new(dec!(4), dec!(1000), dec!(0.4)))
            .unwrap();
        partial.cancel().unwrap();
        assert_eq!(partial.status(), OrderStatus::Cancelled);
        assert_eq!(partial.filled_quantity(), dec!(4));
    }

    #[test]
    fn cancel_terminal_order_leaves_state_unchanged() {
        let mut order = market_buy(dec!(10));
        order.cancel().unwrap();
        let before = order.clone();

        assert!(order.cancel().is_err());
        assert_eq!(order, before);
    }

    #[test]
    fn modify_replaces_price_and_stop() {
        let mut order = Order::new(PlaceOrderCommand::limit(
            "AAPL",
            OrderSide::Buy,
            dec!(10),
            dec!(100),
        ));

        order
            .modify(&OrderChanges {
                price: Some(dec!(101)),
                stop_price: Some(dec!(95)),
                quantity: None,
            })
            .unwrap();

        assert_eq!(order.price(), Some(dec!(101)));
        assert_eq!(order.stop_price(), Some(dec!(95)));
    }

    #[test]
    fn modify_quantity_below_filled_is_ignored() {
        let mut order = market_buy(dec!(100));
        order
            .apply_fill(FillReport::new(dec!(40), dec!(1000), dec!(4)))
            .unwrap();

        order.modify(&OrderChanges::quantity(dec!(30))).unwrap();
        assert_eq!(order.quantity(), dec!(100));

        order.modify(&OrderChanges::quantity(dec!(50))).unwrap();
        assert_eq!(order.quantity(), dec!(50));
        assert_eq!(order.remaining_quantity(), dec!(10));
    }

    #[test]
    fn modify_rejects_non_positive_price() {
        let mut order = market_buy(dec!(10));
        assert!(order.modify(&OrderChanges::price(dec!(0))).is_err());
        assert_eq!(order.price(), None);
    }

    #[test]
    fn serializes_flat_camel_case() {
        let order = Order::new(
            PlaceOrderCommand::limit("AAPL", OrderSide::Sell, dec!(50), dec!(500))
                .with_strategy("stg-1"),
        );
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["type"], "LIMIT");
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["strategyId"], "stg-1");
        assert!(json.get("remainingQuantity").is_some());
        assert!(json.get("filledQuantity").is_some());

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
