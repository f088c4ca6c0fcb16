//! Deterministic admission rules.
//!
//! These run before any randomness is consumed, in fixed precedence:
//! quantity, then price, then notional.

use rust_decimal::Decimal;

use super::pricing;
use crate::domain::order_execution::value_objects::{PlaceOrderCommand, RejectReason};

/// Static checks applied to every placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionRules {
    reference_price: Decimal,
    max_notional: Decimal,
}

impl AdmissionRules {
    /// Create rules with the given reference price and notional ceiling.
    #[must_use]
    pub const fn new(reference_price: Decimal, max_notional: Decimal) -> Self {
        Self {
            reference_price,
            max_notional,
        }
    }

    /// Check a placement against the deterministic rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the command violates.
    pub fn check(&self, cmd: &PlaceOrderCommand) -> Result<(), RejectReason> {
        if cmd.quantity <= Decimal::ZERO {
            return Err(RejectReason::InvalidQuantity);
        }

        if cmd.price.is_some_and(|p| p <= Decimal::ZERO) {
            return Err(RejectReason::InvalidPrice);
        }

        // Overflow is beyond any ceiling.
        match pricing::notional(cmd.quantity, cmd.price, self.reference_price) {
            Some(notional) if notional <= self.max_notional => {}
            _ => return Err(RejectReason::InsufficientFunds),
        }

        Ok(())
    }
}
