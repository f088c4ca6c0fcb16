//! Fill state tracking for a single order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FillReport;
use crate::domain::order_execution::errors::OrderError;

/// Quantity and price accounting for an order.
///
/// Maintains `quantity = filled_quantity + remaining_quantity` and the
/// volume-weighted average fill price across all fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillState {
    quantity: Decimal,
    filled_quantity: Decimal,
    remaining_quantity: Decimal,
    avg_fill_price: Option<Decimal>,
    commission: Decimal,
}

impl FillState {
    /// Create an unfilled state for the requested quantity.
    #[must_use]
    pub const fn new(quantity: Decimal) -> Self {
        Self {
            quantity,
            filled_quantity: Decimal::ZERO,
            remaining_quantity: quantity,
            avg_fill_price: None,
            commission: Decimal::ZERO,
        }
    }

    /// Current order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Cumulative filled quantity.
    #[must_use]
    pub const fn filled_quantity(&self) -> Decimal {
        self.filled_quantity
    }

    /// Quantity still open for execution.
    #[must_use]
    pub const fn remaining_quantity(&self) -> Decimal {
        self.remaining_quantity
    }

    /// Volume-weighted average fill price, `None` until the first fill.
    #[must_use]
    pub const fn avg_fill_price(&self) -> Option<Decimal> {
        self.avg_fill_price
    }

    /// Commission accumulated across all fills.
    #[must_use]
    pub const fn commission(&self) -> Decimal {
        self.commission
    }

    /// Apply an execution.
    ///
    /// # Errors
    ///
    /// Returns error if the fill quantity is not positive or exceeds the
    /// remaining quantity, or if the price accounting overflows. The state
    /// is unchanged on error.
    pub fn apply(&mut self, fill: &FillReport) -> Result<(), OrderError> {
        if fill.quantity <= Decimal::ZERO || fill.quantity > self.remaining_quantity {
            return Err(OrderError::FillExceedsRemaining {
                fill_qty: fill.quantity,
                remaining_qty: self.remaining_quantity,
            });
        }

        // new_avg = (old_avg * old_filled + fill_price * fill_qty) / new_filled
        let new_filled = self.filled_quantity + fill.quantity;
        let avg_fill_price = self
            .avg_fill_price
            .unwrap_or(Decimal::ZERO)
            .checked_mul(self.filled_quantity)
            .and_then(|old_value| old_value.checked_add(fill.quantity.checked_mul(fill.price)?))
            .and_then(|value| value.checked_div(new_filled))
            .ok_or_else(|| OrderError::overflow("average fill price"))?;
        let commission = self
            .commission
            .checked_add(fill.commission)
            .ok_or_else(|| OrderError::overflow("commission"))?;

        self.avg_fill_price = Some(avg_fill_price);
        self.filled_quantity = new_filled;
        self.remaining_quantity = self.quantity - self.filled_quantity;
        self.commission = commission;

        debug_assert!(self.verify_invariant());
        Ok(())
    }

    /// Change the order quantity, keeping what is already filled.
    ///
    /// # Errors
    ///
    /// Returns error unless `new_quantity` exceeds the filled quantity.
    pub fn resize(&mut self, new_quantity: Decimal) -> Result<(), OrderError> {
        if new_quantity <= self.filled_quantity {
            return Err(OrderError::QuantityBelowFilled {
                requested: new_quantity,
                filled: self.filled_quantity,
            });
        }

        self.quantity = new_quantity;
        self.remaining_quantity = new_quantity - self.filled_quantity;
        Ok(())
    }

    /// True once nothing remains to fill.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining_quantity <= Decimal::ZERO
    }

    /// Check `quantity = filled_quantity + remaining_quantity`.
    #[must_use]
    pub fn verify_invariant(&self) -> bool {
        self.quantity == self.filled_quantity + self.remaining_quantity
    }

    /// Notional value filled so far.
    #[must_use]
    pub fn filled_notional(&self) -> Decimal {
        self.avg_fill_price
            .unwrap_or(Decimal::ZERO)
            .saturating_mul(self.filled_quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fill(qty: Decimal, price: Decimal) -> FillReport {
        FillReport::new(qty, price, qty * price * dec!(0.0001))
    }

    #[test]
    fn new_state_is_unfilled() {
        let state = FillState::new(dec!(100));
        assert_eq!(state.filled_quantity(), Decimal::ZERO);
        assert_eq!(state.remaining_quantity(), dec!(100));
        assert_eq!(state.avg_fill_price(), None);
        assert!(state.verify_invariant());
    }

    #[test]
    fn invariant_maintained_through_fills() {
        let mut state = FillState::new(dec!(100));

        state.apply(&fill(dec!(30), dec!(150))).unwrap();
        assert_eq!(state.remaining_quantity(), dec!(70));
        assert!(state.verify_invariant());

        state.apply(&fill(dec!(50), dec!(151))).unwrap();
        assert_eq!(state.remaining_quantity(), dec!(20));
        assert!(state.verify_invariant());

        state.apply(&fill(dec!(20), dec!(150.5))).unwrap();
        assert_eq!(state.remaining_quantity(), Decimal::ZERO);
        assert!(state.is_complete());
        assert!(state.verify_invariant());
    }

    #[test]
    fn average_price_is_volume_weighted() {
        let mut state = FillState::new(dec!(100));
        state.apply(&fill(dec!(40), dec!(100))).unwrap();
        state.apply(&fill(dec!(60), dec!(110))).unwrap();

        // (40 * 100 + 60 * 110) / 100 = 106
        assert_eq!(state.avg_fill_price(), Some(dec!(106)));
        assert_eq!(state.filled_notional(), dec!(10600));
    }

    #[test]
    fn commission_accumulates() {
        let mut state = FillState::new(dec!(100));
        state.apply(&fill(dec!(40), dec!(100))).unwrap();
        state.apply(&fill(dec!(60), dec!(110))).unwrap();

        assert_eq!(state.commission(), dec!(0.4) + dec!(0.66));
    }

    #[test]
    fn overfill_is_rejected() {
        let mut state = FillState::new(dec!(10));
        let err = state.apply(&fill(dec!(11), dec!(100))).unwrap_err();
        assert!(matches!(err, OrderError::FillExceedsRemaining { .. }));
        assert_eq!(state, FillState::new(dec!(10)));
    }

    #[test]
    fn overflowing_fill_leaves_state_unchanged() {
        let mut state = FillState::new(dec!(1000));
        state.apply(&fill(dec!(10), dec!(100))).unwrap();
        let before = state.clone();

        let huge = FillReport::new(dec!(100), Decimal::MAX / dec!(10), Decimal::ZERO);
        let err = state.apply(&huge).unwrap_err();

        assert!(matches!(err, OrderError::ArithmeticOverflow { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn zero_fill_is_rejected() {
        let mut state = FillState::new(dec!(10));
        assert!(state.apply(&fill(Decimal::ZERO, dec!(100))).is_err());
    }

    #[test]
    fn resize_recomputes_remaining() {
        let mut state = FillState::new(dec!(100));
        state.apply(&fill(dec!(40), dec!(100))).unwrap();

        state.resize(dec!(60)).unwrap();
        assert_eq!(state.quantity(), dec!(60));
        assert_eq!(state.remaining_quantity(), dec!(20));
        assert!(state.verify_invariant());
    }

    #[test]
    fn resize_at_or_below_filled_is_rejected() {
        let mut state = FillState::new(dec!(100));
        state.apply(&fill(dec!(40), dec!(100))).unwrap();

        assert!(state.resize(dec!(40)).is_err());
        assert!(state.resize(dec!(10)).is_err());
        assert_eq!(state.quantity(), dec!(100));
    }
}
