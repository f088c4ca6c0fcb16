//! Inbound order requests: placement and modification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderSide, OrderType};
use crate::domain::shared::{StrategyId, Symbol};

/// Command to place a new order.
///
/// Carries only caller-supplied fields; id, status and fill accounting are
/// assigned by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderCommand {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Requested quantity.
    pub quantity: Decimal,
    /// Limit price, if any.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stop trigger price, if any.
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Strategy that placed the order.
    #[serde(default)]
    pub strategy_id: Option<StrategyId>,
    /// Free-form tags copied onto every trade.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PlaceOrderCommand {
    /// Market order without a price.
    #[must_use]
    pub fn market(symbol: impl Into<Symbol>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            strategy_id: None,
            tags: Vec::new(),
        }
    }

    /// Limit order at `price`.
    #[must_use]
    pub fn limit(
        symbol: impl Into<Symbol>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(symbol, side, quantity)
        }
    }

    /// Stop order triggered at `stop_price`.
    #[must_use]
    pub fn stop(
        symbol: impl Into<Symbol>,
        side: OrderSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::Stop,
            stop_price: Some(stop_price),
            ..Self::market(symbol, side, quantity)
        }
    }

    /// Set the price.
    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the strategy reference.
    #[must_use]
    pub fn with_strategy(mut self, strategy_id: impl Into<StrategyId>) -> Self {
        self.strategy_id = Some(strategy_id.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Requested changes to a working order. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderChanges {
    /// New limit price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// New total quantity (must exceed the filled quantity to take effect).
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// New stop price.
    #[serde(default)]
    pub stop_price: Option<Decimal>,
}

impl OrderChanges {
    /// Change only the price.
    #[must_use]
    pub fn price(price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// Change only the quantity.
    #[must_use]
    pub fn quantity(quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// Change only the stop price.
    #[must_use]
    pub fn stop_price(stop_price: Decimal) -> Self {
        Self {
            stop_price: Some(stop_price),
            ..Self::default()
        }
    }

    /// True if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.quantity.is_none() && self.stop_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn limit_builder_sets_type_and_price() {
        let cmd = PlaceOrderCommand::limit("aapl", OrderSide::Sell, dec!(50), dec!(500))
            .with_strategy("mean-revert")
            .with_tag("swing");

        assert_eq!(cmd.symbol.as_str(), "AAPL");
        assert_eq!(cmd.order_type, OrderType::Limit);
        assert_eq!(cmd.price, Some(dec!(500)));
        assert_eq!(cmd.strategy_id, Some(StrategyId::new("mean-revert")));
        assert_eq!(cmd.tags, vec!["swing".to_string()]);
    }

    #[test]
    fn deserializes_rest_payload() {
        let json = r#"{
            "symbol": "msft",
            "side": "BUY",
            "type": "STOP_LIMIT",
            "quantity": "10",
            "price": "410.5",
            "stopPrice": "405",
            "tags": ["hedge"]
        }"#;

        let cmd: PlaceOrderCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.symbol.as_str(), "MSFT");
        assert_eq!(cmd.order_type, OrderType::StopLimit);
        assert_eq!(cmd.stop_price, Some(dec!(405)));
        assert_eq!(cmd.strategy_id, None);
    }

    #[test]
    fn empty_changes() {
        assert!(OrderChanges::default().is_empty());
        assert!(!OrderChanges::quantity(dec!(5)).is_empty());
    }
}
