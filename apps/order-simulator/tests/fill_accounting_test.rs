//! Property Tests for Fill Accounting
//!
//! Applies arbitrary sequences of executions to an order and checks the
//! quantity, average-price, and commission bookkeeping after every step.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;

use order_simulator::domain::order_execution::value_objects::FillReport;
use order_simulator::{Order, OrderChanges, OrderSide, OrderStatus, PlaceOrderCommand};

/// (fraction of remaining in percent, price in cents)
fn fills() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..=100, 1u32..=500_000), 1..12)
}

proptest! {
    #[test]
    fn fills_keep_order_consistent(quantity in 1u32..=10_000, steps in fills()) {
        let quantity = Decimal::from(quantity);
        let mut order = Order::new(PlaceOrderCommand::market("AAPL", OrderSide::Buy, quantity));

        let mut notional = Decimal::ZERO;
        let mut commission = Decimal::ZERO;
        let mut trades = 0usize;

        for (percent, cents) in steps {
            if !order.status().is_active() {
                break;
            }

            let fill_qty = (order.remaining_quantity() * Decimal::from(percent) / Decimal::from(100))
                .floor()
                .max(Decimal::ONE);
            let price = Decimal::new(i64::from(cents), 2);
            let fee = fill_qty * price / Decimal::from(10_000);

            let trade = order.apply_fill(FillReport::new(fill_qty, price, fee)).unwrap();
            trades += 1;
            notional += fill_qty * price;
            commission += fee;

            prop_assert_eq!(trade.quantity(), fill_qty);
            prop_assert_eq!(trade.order_id(), order.id());
            prop_assert_eq!(
                order.filled_quantity() + order.remaining_quantity(),
                order.quantity()
            );
            prop_assert!(order.remaining_quantity() >= Decimal::ZERO);
            prop_assert_eq!(order.commission(), commission);

            let avg = order.avg_fill_price().unwrap();
            let expected = notional / order.filled_quantity();
            prop_assert!((avg - expected).abs() < Decimal::new(1, 12));

            prop_assert_eq!(
                order.status() == OrderStatus::Filled,
                order.remaining_quantity() == Decimal::ZERO
            );
            prop_assert_eq!(order.filled_at().is_some(), order.status() == OrderStatus::Filled);
        }

        prop_assert!(trades > 0);
    }

    #[test]
    fn resize_never_drops_below_filled(quantity in 2u32..=1_000, filled_pct in 1u32..100, new_qty in 0u32..=2_000) {
        let quantity = Decimal::from(quantity);
        let mut order = Order::new(PlaceOrderCommand::limit("AAPL", OrderSide::Sell, quantity, Decimal::ONE_HUNDRED));

        let filled = (quantity * Decimal::from(filled_pct) / Decimal::from(100))
            .floor()
            .max(Decimal::ONE)
            .min(quantity - Decimal::ONE);
        order.apply_fill(FillReport::new(filled, Decimal::ONE_HUNDRED, Decimal::ZERO)).unwrap();

        let new_qty = Decimal::from(new_qty);
        order.modify(&OrderChanges::quantity(new_qty)).unwrap();

        if new_qty > filled {
            prop_assert_eq!(order.quantity(), new_qty);
        } else {
            prop_assert_eq!(order.quantity(), quantity);
        }
        prop_assert_eq!(order.filled_quantity(), filled);
        prop_assert_eq!(
            order.filled_quantity() + order.remaining_quantity(),
            order.quantity()
        );
        prop_assert_eq!(order.status(), OrderStatus::PartiallyFilled);
    }
}
