//! Admission Service
//!
//! Decides at placement whether an order becomes `PENDING` or `REJECTED`.
//! The deterministic rules run first and consume no randomness; an order
//! that passes them always draws one rejection roll.

use crate::application::ports::RandomSource;
use crate::config::{AdmissionConfig, PricingConfig};
use crate::domain::order_execution::services::AdmissionRules;
use crate::domain::order_execution::value_objects::{PlaceOrderCommand, RejectReason};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Accept the order as `PENDING`.
    Admit,
    /// Store the order as `REJECTED` with this reason.
    Reject(RejectReason),
}

/// Placement validator.
#[derive(Debug, Clone)]
pub struct AdmissionService {
    rules: AdmissionRules,
    random_rejection_probability: f64,
}

impl AdmissionService {
    /// Create the service from configuration.
    #[must_use]
    pub fn new(pricing: &PricingConfig, admission: &AdmissionConfig) -> Self {
        Self {
            rules: AdmissionRules::new(pricing.reference_price, admission.max_notional),
            random_rejection_probability: admission.random_rejection_probability,
        }
    }

    /// Evaluate a placement.
    ///
    /// Draws: one rejection roll once the static rules pass, plus one reason
    /// index when the roll rejects.
    pub fn evaluate(&self, cmd: &PlaceOrderCommand, random: &dyn RandomSource) -> Admission {
        if let Err(reason) = self.rules.check(cmd) {
            return Admission::Reject(reason);
        }

        if random.next_unit() < self.random_rejection_probability {
            let reasons = RejectReason::OPERATIONAL;
            let reason = reasons[random.pick_index(reasons.len())];
            return Admission::Reject(reason);
        }

        Admission::Admit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::value_objects::OrderSide;
    use crate::infrastructure::random::ScriptedRandomSource;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn service(probability: f64) -> AdmissionService {
        AdmissionService::new(
            &PricingConfig::default(),
            &AdmissionConfig {
                random_rejection_probability: probability,
                ..AdmissionConfig::default()
            },
        )
    }

    #[test]
    fn static_rejection_consumes_no_randomness() {
        let random = ScriptedRandomSource::new([0.0, 0.0], 0.0);
        let cmd = PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(0));

        assert_eq!(
            service(1.0).evaluate(&cmd, &random),
            Admission::Reject(RejectReason::InvalidQuantity)
        );
        assert_eq!(random.remaining(), 2);
    }

    #[test]
    fn admitted_order_draws_exactly_one_roll() {
        let random = ScriptedRandomSource::new([0.5, 0.5], 0.0);
        let cmd = PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(10));

        assert_eq!(service(0.05).evaluate(&cmd, &random), Admission::Admit);
        assert_eq!(random.remaining(), 1);
    }

    #[test_case(0.0, RejectReason::MarketClosed ; "first reason")]
    #[test_case(0.3, RejectReason::SymbolNotTradeable ; "second reason")]
    #[test_case(0.6, RejectReason::PriceLimitExceeded ; "third reason")]
    #[test_case(0.9, RejectReason::RiskManagement ; "fourth reason")]
    fn random_rejection_picks_reason_uniformly(index_draw: f64, expected: RejectReason) {
        let random = ScriptedRandomSource::new([0.01, index_draw], 0.0);
        let cmd = PlaceOrderCommand::limit("AAPL", OrderSide::Sell, dec!(10), dec!(100));

        assert_eq!(
            service(0.05).evaluate(&cmd, &random),
            Admission::Reject(expected)
        );
    }

    #[test]
    fn zero_probability_never_rejects() {
        let random = ScriptedRandomSource::new([], 0.0);
        let cmd = PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(10));

        assert_eq!(service(0.0).evaluate(&cmd, &random), Admission::Admit);
    }
}
