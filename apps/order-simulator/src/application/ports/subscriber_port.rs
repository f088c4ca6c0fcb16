//! Order Book Subscriber Port (Driven Port)
//!
//! Interface for consumers that want a full order-book snapshot after every
//! mutation.

use crate::domain::order_execution::aggregate::Order;

/// Failure reported by a subscriber callback.
///
/// The simulator logs it and moves on to the next subscriber.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Subscriber failed: {message}")]
pub struct SubscriberError {
    /// Error message.
    pub message: String,
}

impl SubscriberError {
    /// Create a new subscriber error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port for receiving order-book snapshots.
///
/// Called synchronously on the mutating task after the store lock is
/// released. Snapshots are ordered most recently placed first.
pub trait OrderBookSubscriber: Send + Sync {
    /// Receive the current order book.
    fn on_order_book(&self, orders: &[Order]) -> Result<(), SubscriberError>;
}

impl<F> OrderBookSubscriber for F
where
    F: Fn(&[Order]) -> Result<(), SubscriberError> + Send + Sync,
{
    fn on_order_book(&self, orders: &[Order]) -> Result<(), SubscriberError> {
        self(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn closures_are_subscribers() {
        let seen = AtomicUsize::new(0);
        let subscriber = |orders: &[Order]| -> Result<(), SubscriberError> {
            seen.fetch_add(orders.len() + 1, Ordering::SeqCst);
            Ok(())
        };

        subscriber.on_order_book(&[]).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn error_display() {
        let err = SubscriberError::new("socket closed");
        assert_eq!(err.to_string(), "Subscriber failed: socket closed");
    }
}
