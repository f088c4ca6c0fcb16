//! Order execution errors.

use rust_decimal::Decimal;
use thiserror::Error;

use super::value_objects::OrderStatus;

/// Errors that can occur when mutating an order.
///
/// None of these escape the simulator's public surface: cancel and modify
/// report them as `false`, and the fill path logs them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order not found.
    #[error("Order not found: {order_id}")]
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Order cannot be filled in current state.
    #[error("Cannot fill order in status {status}")]
    CannotFill {
        /// Current status.
        status: OrderStatus,
    },

    /// Order cannot be cancelled in current state.
    #[error("Cannot cancel order in status {status}")]
    CannotCancel {
        /// Current status.
        status: OrderStatus,
    },

    /// Order cannot be modified in current state.
    #[error("Cannot modify order in status {status}")]
    CannotModify {
        /// Current status.
        status: OrderStatus,
    },

    /// Fill quantity is not positive or exceeds remaining quantity.
    #[error("Fill quantity {fill_qty} invalid for remaining quantity {remaining_qty}")]
    FillExceedsRemaining {
        /// Fill quantity attempted.
        fill_qty: Decimal,
        /// Remaining quantity.
        remaining_qty: Decimal,
    },

    /// New quantity does not exceed what is already filled.
    #[error("Quantity {requested} must exceed filled quantity {filled}")]
    QuantityBelowFilled {
        /// Requested quantity.
        requested: Decimal,
        /// Already filled quantity.
        filled: Decimal,
    },

    /// Fill arithmetic exceeded the decimal range.
    #[error("Arithmetic overflow computing {operation}")]
    ArithmeticOverflow {
        /// Quantity being computed.
        operation: String,
    },

    /// Invalid order parameters.
    #[error("Invalid {field}: {message}")]
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },
}

impl OrderError {
    /// Overflow while computing `operation`.
    #[must_use]
    pub fn overflow(operation: &str) -> Self {
        Self::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}
