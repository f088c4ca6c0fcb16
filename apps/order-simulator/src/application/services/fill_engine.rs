//! Fill Engine
//!
//! Decides what a single fill attempt does to a working order: fill all of
//! it, fill a fraction, or nothing. Prices market orders with slippage and
//! charges commission on every execution.

use rust_decimal::Decimal;

use crate::application::ports::RandomSource;
use crate::config::{FillsConfig, PricingConfig};
use crate::domain::order_execution::aggregate::Order;
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::services::pricing;
use crate::domain::order_execution::value_objects::FillReport;

/// Which band the scenario draw landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillScenario {
    /// Fill the entire remaining quantity.
    Full,
    /// Fill a fraction of the remaining quantity and try again later.
    Partial,
    /// Nothing fills this attempt.
    NoFill,
}

/// Result of one fill attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillDecision {
    /// Scenario drawn.
    pub scenario: FillScenario,
    /// Execution to apply, absent when nothing fills (including a partial
    /// fraction that rounds down to zero).
    pub report: Option<FillReport>,
}

/// Fill decision maker.
#[derive(Debug, Clone)]
pub struct FillEngine {
    pricing: PricingConfig,
    fills: FillsConfig,
}

impl FillEngine {
    /// Create the engine from configuration.
    #[must_use]
    pub const fn new(pricing: PricingConfig, fills: FillsConfig) -> Self {
        Self { pricing, fills }
    }

    /// Decide the outcome of one attempt against `order`.
    ///
    /// Draws, in order: the scenario, the fraction (partial only), and the
    /// slippage (market orders with a non-zero fill only).
    ///
    /// # Errors
    ///
    /// Returns error if the fill price or commission overflows. The draws
    /// already taken stay consumed.
    pub fn decide(
        &self,
        order: &Order,
        random: &dyn RandomSource,
    ) -> Result<FillDecision, OrderError> {
        let draw = random.next_unit();
        let remaining = order.remaining_quantity();

        let (scenario, quantity) = if draw < self.fills.full_fill_threshold {
            (FillScenario::Full, remaining)
        } else if draw < self.fills.partial_fill_threshold {
            let fraction = lerp(
                self.fills.partial_fraction_min,
                self.fills.partial_fraction_max,
                random.next_unit(),
            );
            let quantity = remaining
                .checked_mul(fraction)
                .ok_or_else(|| OrderError::overflow("partial quantity"))?;
            (FillScenario::Partial, quantity.floor())
        } else {
            (FillScenario::NoFill, Decimal::ZERO)
        };

        if quantity <= Decimal::ZERO {
            return Ok(FillDecision {
                scenario,
                report: None,
            });
        }

        let price = self.fill_price(order, random)?;
        let commission =
            pricing::calculate_commission(quantity, price, self.pricing.commission_rate)
                .ok_or_else(|| OrderError::overflow("commission"))?;

        Ok(FillDecision {
            scenario,
            report: Some(FillReport::new(quantity, price, commission)),
        })
    }

    /// Market orders slip away from the base price; everything else fills at
    /// its own price.
    fn fill_price(
        &self,
        order: &Order,
        random: &dyn RandomSource,
    ) -> Result<Decimal, OrderError> {
        let base = pricing::base_price(order.price(), self.pricing.reference_price);

        if !order.order_type().is_market() {
            return Ok(base);
        }

        let slippage = lerp(
            self.pricing.slippage_min,
            self.pricing.slippage_max,
            random.next_unit(),
        );
        pricing::apply_slippage(base, order.side(), slippage)
            .ok_or_else(|| OrderError::overflow("slipped price"))
    }
}

/// `lo + u × (hi − lo)` in decimal arithmetic.
fn lerp(lo: Decimal, hi: Decimal, u: f64) -> Decimal {
    let u = Decimal::try_from(u).unwrap_or(Decimal::ZERO);
    lo + u * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::value_objects::{OrderSide, PlaceOrderCommand};
    use crate::infrastructure::random::ScriptedRandomSource;
    use rust_decimal_macros::dec;

    fn engine() -> FillEngine {
        FillEngine::new(PricingConfig::default(), FillsConfig::default())
    }

    #[test]
    fn full_fill_market_buy_slips_up() {
        let order = Order::new(PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(100)));
        let random = ScriptedRandomSource::new([0.0, 0.5], 0.0);

        let decision = engine().decide(&order, &random).unwrap();
        let report = decision.report.unwrap();

        assert_eq!(decision.scenario, FillScenario::Full);
        assert_eq!(report.quantity, dec!(100));
        assert_eq!(report.price, dec!(1003));
        assert_eq!(report.commission, dec!(10.03));
        assert_eq!(random.remaining(), 0);
    }

    #[test]
    fn market_sell_slips_down() {
        let order = Order::new(PlaceOrderCommand::market("AAPL", OrderSide::Sell, dec!(10)));
        let random = ScriptedRandomSource::new([0.0, 0.0], 0.0);

        let report = engine().decide(&order, &random).unwrap().report.unwrap();
        assert_eq!(report.price, dec!(999));
    }

    #[test]
    fn limit_partial_fill_uses_limit_price() {
        let order = Order::new(PlaceOrderCommand::limit(
            "AAPL",
            OrderSide::Sell,
            dec!(50),
            dec!(500),
        ));
        let random = ScriptedRandomSource::new([0.8, 0.5], 0.99);

        let decision = engine().decide(&order, &random).unwrap();
        let report = decision.report.unwrap();

        assert_eq!(decision.scenario, FillScenario::Partial);
        assert_eq!(report.quantity, dec!(25));
        assert_eq!(report.price, dec!(500));
        assert_eq!(report.commission, dec!(1.25));
        // No slippage draw for limit orders.
        assert_eq!(random.remaining(), 0);
    }

    #[test]
    fn stop_order_without_price_fills_at_reference() {
        let order = Order::new(PlaceOrderCommand::stop(
            "AAPL",
            OrderSide::Buy,
            dec!(5),
            dec!(1200),
        ));
        let random = ScriptedRandomSource::new([0.1], 0.0);

        let report = engine().decide(&order, &random).unwrap().report.unwrap();
        assert_eq!(report.price, dec!(1000));
    }

    #[test]
    fn partial_that_floors_to_zero_has_no_report() {
        let order = Order::new(PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(1)));
        let random = ScriptedRandomSource::new([0.8, 0.5, 0.5], 0.0);

        let decision = engine().decide(&order, &random).unwrap();

        assert_eq!(decision.scenario, FillScenario::Partial);
        assert!(decision.report.is_none());
        // Scenario and fraction only.
        assert_eq!(random.remaining(), 1);
    }

    #[test]
    fn high_draw_is_no_fill() {
        let order = Order::new(PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(1)));
        let random = ScriptedRandomSource::new([0.95], 0.0);

        let decision = engine().decide(&order, &random).unwrap();
        assert_eq!(decision.scenario, FillScenario::NoFill);
        assert!(decision.report.is_none());
    }

    #[test]
    fn overflowing_commission_is_an_error() {
        let order = Order::new(PlaceOrderCommand::limit(
            "AAPL",
            OrderSide::Buy,
            dec!(1000),
            Decimal::MAX / dec!(10),
        ));
        let random = ScriptedRandomSource::new([0.0], 0.99);

        let err = engine().decide(&order, &random).unwrap_err();
        assert_eq!(err, OrderError::overflow("commission"));
    }

    #[test]
    fn overflowing_slippage_is_an_error() {
        let order = Order::new(
            PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(1)).with_price(Decimal::MAX),
        );
        let random = ScriptedRandomSource::new([0.0, 0.5], 0.99);

        let err = engine().decide(&order, &random).unwrap_err();
        assert_eq!(err, OrderError::overflow("slipped price"));
    }

    #[test]
    fn lerp_interpolates() {
        assert_eq!(lerp(dec!(0.3), dec!(0.7), 0.5), dec!(0.5));
        assert_eq!(lerp(dec!(0.3), dec!(0.7), 0.0), dec!(0.3));
        assert_eq!(lerp(dec!(0.001), dec!(0.005), 0.25), dec!(0.002));
    }
}
