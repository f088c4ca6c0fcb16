//! Order-book snapshot fan-out.
//!
//! Callback subscribers are invoked in registration order; each one is
//! isolated so that an error or panic in one never reaches the others or the
//! mutating caller. Async consumers can use the broadcast receiver from
//! [`NotificationBus::updates`] instead.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::application::ports::OrderBookSubscriber;
use crate::domain::order_execution::aggregate::Order;

/// Identifier assigned to each subscription.
pub type SubscriptionId = u64;

/// Immutable order-book snapshot shared by every listener.
pub type OrderBookSnapshot = Arc<[Order]>;

type Registry = RwLock<Vec<(SubscriptionId, Arc<dyn OrderBookSubscriber>)>>;

/// Fan-out of order-book snapshots to callbacks and broadcast receivers.
pub struct NotificationBus {
    subscribers: Arc<Registry>,
    next_id: AtomicU64,
    updates: broadcast::Sender<OrderBookSnapshot>,
}

impl NotificationBus {
    /// Create a bus whose broadcast channel holds `capacity` snapshots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; configuration validation rejects that.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (updates, _) = broadcast::channel(capacity);

        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicU64::new(1),
            updates,
        }
    }

    /// Register a callback subscriber.
    pub fn subscribe(&self, subscriber: Arc<dyn OrderBookSubscriber>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push((id, subscriber));

        tracing::debug!(subscription_id = id, "Order book subscriber registered");

        Subscription {
            id,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    /// New broadcast receiver of snapshots.
    ///
    /// Slow receivers observe `RecvError::Lagged` and skip to newer snapshots.
    #[must_use]
    pub fn updates(&self) -> broadcast::Receiver<OrderBookSnapshot> {
        self.updates.subscribe()
    }

    /// Number of registered callback subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Whether anyone would observe a publish.
    #[must_use]
    pub fn has_listeners(&self) -> bool {
        self.updates.receiver_count() > 0 || !self.subscribers.read().is_empty()
    }

    /// Deliver a snapshot to every callback and broadcast receiver.
    pub fn publish(&self, orders: Vec<Order>) {
        let snapshot: OrderBookSnapshot = orders.into();

        // Callbacks may subscribe or unsubscribe re-entrantly.
        let subscribers: Vec<_> = self
            .subscribers
            .read()
            .iter()
            .map(|(id, s)| (*id, Arc::clone(s)))
            .collect();

        for (id, subscriber) in subscribers {
            match catch_unwind(AssertUnwindSafe(|| subscriber.on_order_book(&snapshot))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(subscription_id = id, error = %e, "Order book subscriber failed");
                }
                Err(payload) => {
                    tracing::warn!(
                        subscription_id = id,
                        panic = panic_message(payload.as_ref()),
                        "Order book subscriber panicked"
                    );
                }
            }
        }

        // No receivers is not an error.
        let _ = self.updates.send(snapshot);
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscriber_count())
            .field("receivers", &self.updates.receiver_count())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Handle for a registered subscriber.
///
/// Dropping the handle keeps the subscriber registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Subscription ID.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the subscriber.
    ///
    /// Returns `false` if it was already removed or the bus no longer exists.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };

        let mut subscribers = registry.write();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != self.id);
        let removed = subscribers.len() != before;

        tracing::debug!(subscription_id = self.id, removed, "Order book subscriber removed");
        removed
    }
}
