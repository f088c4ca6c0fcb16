//! Fill pricing: base price, market slippage, and commission.

use rust_decimal::Decimal;

use crate::domain::order_execution::value_objects::OrderSide;

/// Price an order executes against before slippage.
///
/// Orders without a limit price use the reference price. The stop price is
/// never used as a fill price.
#[must_use]
pub fn base_price(price: Option<Decimal>, reference_price: Decimal) -> Decimal {
    price.unwrap_or(reference_price)
}

/// Apply proportional slippage against the taker.
///
/// For buys: pay more (worse fill)
/// For sells: receive less (worse fill)
///
/// Returns `None` if the slipped price overflows.
#[must_use]
pub fn apply_slippage(price: Decimal, side: OrderSide, slippage_pct: Decimal) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(side.sign().checked_mul(slippage_pct)?)?;
    price.checked_mul(factor)
}

/// Commission for a single execution: `quantity × price × rate`.
///
/// Returns `None` if the notional overflows.
#[must_use]
pub fn calculate_commission(quantity: Decimal, price: Decimal, rate: Decimal) -> Option<Decimal> {
    quantity.checked_mul(price)?.checked_mul(rate)
}

/// Notional value used for the funds check, `None` on overflow.
#[must_use]
pub fn notional(
    quantity: Decimal,
    price: Option<Decimal>,
    reference_price: Decimal,
) -> Option<Decimal> {
    quantity.checked_mul(base_price(price, reference_price))
}
