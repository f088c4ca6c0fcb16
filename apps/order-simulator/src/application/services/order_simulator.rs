//! Order Simulator
//!
//! The public face of the simulator. Placement, cancellation and
//! modification return immediately; fills happen later on Tokio timers.
//!
//! # Concurrency
//!
//! - All order and trade mutation goes through one mutex
//! - Timers hold a `Weak` reference and re-check the order status, so a
//!   timer for a cancelled or finished order is a no-op
//! - Snapshots are taken under the same lock as the mutation they report
//!   and delivered to subscribers after the mutex is released

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::broadcast;

use super::admission::{Admission, AdmissionService};
use super::fill_engine::{FillEngine, FillScenario};
use super::notification_bus::{NotificationBus, OrderBookSnapshot, Subscription};
use super::scheduler::Scheduler;
use crate::application::dto::{OrderBookStats, orders_to_csv, trades_to_csv};
use crate::application::ports::{OrderBookSubscriber, RandomSource};
use crate::config::{Config, validate_config};
use crate::domain::order_execution::aggregate::{Order, Trade};
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::repository::OrderRepository;
use crate::domain::order_execution::value_objects::{
    OrderChanges, OrderStatus, OrderType, PlaceOrderCommand,
};
use crate::domain::shared::{OrderId, StrategyId};
use crate::error::SimulatorError;
use crate::infrastructure::persistence::InMemoryOrderStore;

/// What caused a fill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    FirstAttempt,
    FollowUp,
    Sweep,
}

impl Trigger {
    const fn as_str(self) -> &'static str {
        match self {
            Self::FirstAttempt => "first_attempt",
            Self::FollowUp => "follow_up",
            Self::Sweep => "sweep",
        }
    }
}

/// State guarded by the simulator mutex.
struct SimulatorState {
    orders: Box<dyn OrderRepository>,
    follow_ups: HashMap<OrderId, u32>,
}

struct Inner {
    config: Config,
    state: Mutex<SimulatorState>,
    random: Arc<dyn RandomSource>,
    admission: AdmissionService,
    fill_engine: FillEngine,
    scheduler: Scheduler,
    bus: NotificationBus,
}

/// In-memory order execution simulator.
///
/// Must be created inside a Tokio runtime. Dropping it (or calling
/// [`OrderSimulator::shutdown`]) stops the sweep and every pending timer.
pub struct OrderSimulator {
    inner: Arc<Inner>,
}

impl OrderSimulator {
    /// Create a simulator backed by an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns error if called outside a Tokio runtime or if `config` fails
    /// validation.
    pub fn new(config: Config, random: Arc<dyn RandomSource>) -> Result<Self, SimulatorError> {
        Self::with_repository(config, random, Box::new(InMemoryOrderStore::new()))
    }

    /// Create a simulator over a caller-supplied repository.
    ///
    /// # Errors
    ///
    /// Returns error if called outside a Tokio runtime or if `config` fails
    /// validation.
    pub fn with_repository(
        config: Config,
        random: Arc<dyn RandomSource>,
        orders: Box<dyn OrderRepository>,
    ) -> Result<Self, SimulatorError> {
        validate_config(&config)?;
        let handle = Handle::try_current()?;

        let inner = Arc::new(Inner {
            admission: AdmissionService::new(&config.pricing, &config.admission),
            fill_engine: FillEngine::new(config.pricing.clone(), config.fills.clone()),
            scheduler: Scheduler::new(handle),
            bus: NotificationBus::new(config.notifications.channel_capacity),
            state: Mutex::new(SimulatorState {
                orders,
                follow_ups: HashMap::new(),
            }),
            random,
            config,
        });

        if inner.config.sweep.enabled {
            Inner::start_sweep(&inner);
        }

        tracing::info!(
            sweep_enabled = inner.config.sweep.enabled,
            sweep_interval_ms = inner.config.sweep.interval_ms,
            rejection_probability = inner.config.admission.random_rejection_probability,
            "Order simulator started"
        );

        Ok(Self { inner })
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Place an order.
    ///
    /// Never fails: an order that does not pass admission is stored and
    /// returned with status `REJECTED` and a reason. Admitted orders are
    /// `PENDING` with a first fill attempt scheduled.
    pub fn place_order(&self, cmd: PlaceOrderCommand) -> Order {
        let inner = &self.inner;

        let (order, first_attempt) = match inner.admission.evaluate(&cmd, &*inner.random) {
            Admission::Reject(reason) => {
                let order = Order::rejected(cmd, reason);
                tracing::warn!(
                    order_id = %order.id(),
                    symbol = %order.symbol(),
                    side = %order.side(),
                    quantity = %order.quantity(),
                    reason = %reason,
                    "Order rejected"
                );
                (order, None)
            }
            Admission::Admit => {
                let order = Order::new(cmd);
                let delay = inner.first_attempt_delay(order.order_type());
                tracing::info!(
                    order_id = %order.id(),
                    symbol = %order.symbol(),
                    side = %order.side(),
                    order_type = %order.order_type(),
                    quantity = %order.quantity(),
                    first_attempt_ms = delay.as_millis(),
                    "Order placed"
                );
                (order, Some(delay))
            }
        };

        let snapshot = {
            let mut state = inner.state.lock();
            state.orders.insert(order.clone());
            inner.snapshot(&state)
        };

        if let Some(delay) = first_attempt {
            Inner::schedule_attempt(inner, order.id().clone(), delay, Trigger::FirstAttempt);
        }

        inner.publish(snapshot);
        order
    }

    /// Cancel a working order.
    ///
    /// Returns `false`, leaving state unchanged, if the order does not exist
    /// or is not `PENDING`/`PARTIALLY_FILLED`.
    pub fn cancel_order(&self, id: &OrderId) -> bool {
        let result = {
            let mut state = self.inner.state.lock();
            state
                .orders
                .find_by_id_mut(id)
                .ok_or_else(|| not_found(id))
                .and_then(Order::cancel)
                .map(|()| {
                    state.follow_ups.remove(id);
                    self.inner.snapshot(&state)
                })
        };

        match result {
            Ok(snapshot) => {
                tracing::info!(order_id = %id, "Order cancelled");
                self.inner.publish(snapshot);
                true
            }
            Err(e) => {
                tracing::debug!(order_id = %id, error = %e, "Cancel refused");
                false
            }
        }
    }

    /// Modify a working order.
    ///
    /// Price and stop price are replaced. A quantity at or below the filled
    /// quantity is ignored while the rest of the change still applies.
    /// Returns `false` if the order does not exist, is not
    /// `PENDING`/`PARTIALLY_FILLED`, or a supplied price is not positive.
    pub fn modify_order(&self, id: &OrderId, changes: &OrderChanges) -> bool {
        let result = {
            let mut state = self.inner.state.lock();
            state
                .orders
                .find_by_id_mut(id)
                .ok_or_else(|| not_found(id))
                .and_then(|order| {
                    order.modify(changes)?;
                    Ok(order.quantity())
                })
                .map(|quantity| (quantity, self.inner.snapshot(&state)))
        };

        match result {
            Ok((quantity, snapshot)) => {
                let quantity_applied = changes.quantity.is_none_or(|q| q == quantity);
                tracing::info!(
                    order_id = %id,
                    price = ?changes.price,
                    stop_price = ?changes.stop_price,
                    quantity = %quantity,
                    quantity_applied,
                    "Order modified"
                );
                self.inner.publish(snapshot);
                true
            }
            Err(e) => {
                tracing::debug!(order_id = %id, error = %e, "Modify refused");
                false
            }
        }
    }

    /// Register a callback for order-book snapshots.
    pub fn subscribe<S>(&self, subscriber: S) -> Subscription
    where
        S: OrderBookSubscriber + 'static,
    {
        self.inner.bus.subscribe(Arc::new(subscriber))
    }

    /// Broadcast receiver of order-book snapshots for async consumers.
    #[must_use]
    pub fn updates(&self) -> broadcast::Receiver<OrderBookSnapshot> {
        self.inner.bus.updates()
    }

    /// Stop the sweep and every pending fill attempt.
    ///
    /// Queries, cancel and modify keep working; new placements are stored but
    /// never fill.
    pub fn shutdown(&self) {
        if !self.inner.scheduler.is_shut_down() {
            self.inner.scheduler.shutdown();
            tracing::info!("Order simulator stopped");
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Look up an order.
    #[must_use]
    pub fn get_order(&self, id: &OrderId) -> Option<Order> {
        self.inner.state.lock().orders.find_by_id(id).cloned()
    }

    /// All orders, most recently placed first.
    #[must_use]
    pub fn list_orders(&self) -> Vec<Order> {
        self.inner.state.lock().orders.list()
    }

    /// Orders in `status`, most recently placed first.
    #[must_use]
    pub fn list_orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.inner.state.lock().orders.find_by_status(status)
    }

    /// Orders still working, most recently placed first.
    #[must_use]
    pub fn list_active_orders(&self) -> Vec<Order> {
        self.inner.state.lock().orders.find_active()
    }

    /// Orders placed by a strategy, most recently placed first.
    #[must_use]
    pub fn list_orders_by_strategy(&self, strategy_id: &StrategyId) -> Vec<Order> {
        self.inner.state.lock().orders.find_by_strategy(strategy_id)
    }

    /// All trades, most recent first.
    #[must_use]
    pub fn list_trades(&self) -> Vec<Trade> {
        self.inner.state.lock().orders.trades()
    }

    /// Trades for one order, in execution order.
    #[must_use]
    pub fn list_trades_for_order(&self, id: &OrderId) -> Vec<Trade> {
        self.inner.state.lock().orders.trades_for_order(id)
    }

    /// Counts per status and trade totals.
    #[must_use]
    pub fn stats(&self) -> OrderBookStats {
        let (orders, trades) = {
            let state = self.inner.state.lock();
            (state.orders.list(), state.orders.trades())
        };
        OrderBookStats::from_ledger(&orders, &trades)
    }

    /// Orders as CSV, most recently placed first.
    #[must_use]
    pub fn export_orders_csv(&self) -> String {
        orders_to_csv(&self.list_orders())
    }

    /// Trades as CSV, most recent first.
    #[must_use]
    pub fn export_trades_csv(&self) -> String {
        trades_to_csv(&self.list_trades())
    }
}

impl Drop for OrderSimulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for OrderSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSimulator")
            .field("config", &self.inner.config)
            .field("bus", &self.inner.bus)
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn first_attempt_delay(&self, order_type: OrderType) -> Duration {
        let scheduling = &self.config.scheduling;
        let jitter = self.random.uniform(0.0, scheduling.jitter_ms as f64);
        scheduling.base_delay(order_type.is_market()) + Duration::from_millis(jitter as u64)
    }

    fn follow_up_delay(&self) -> Duration {
        let scheduling = &self.config.scheduling;
        let ms = self.random.uniform(
            scheduling.follow_up_min_delay_ms as f64,
            scheduling.follow_up_max_delay_ms as f64,
        );
        Duration::from_millis(ms as u64)
    }

    fn schedule_attempt(this: &Arc<Self>, id: OrderId, delay: Duration, trigger: Trigger) {
        let weak: Weak<Self> = Arc::downgrade(this);

        this.scheduler.schedule_once(delay, move || {
            if let Some(inner) = weak.upgrade() {
                Self::process(&inner, &id, trigger);
            }
        });
    }

    fn start_sweep(this: &Arc<Self>) {
        let weak = Arc::downgrade(this);

        this.scheduler
            .schedule_every(this.config.sweep.interval(), move || match weak.upgrade() {
                Some(inner) => {
                    Self::sweep(&inner);
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Break(()),
            });
    }

    /// Give every `PENDING` order a chance to fill.
    ///
    /// One selection draw per pending order, in placement order, before any
    /// attempt runs.
    fn sweep(this: &Arc<Self>) {
        let pending = this.state.lock().orders.pending_ids();
        let probability = this.config.sweep.fill_probability;

        let selected: Vec<OrderId> = pending
            .into_iter()
            .filter(|_| this.random.next_unit() < probability)
            .collect();

        if !selected.is_empty() {
            tracing::debug!(selected = selected.len(), "Sweep selected pending orders");
        }

        for id in &selected {
            Self::process(this, id, Trigger::Sweep);
        }
    }

    /// Run one fill attempt.
    fn process(this: &Arc<Self>, id: &OrderId, trigger: Trigger) {
        let mut state = this.state.lock();

        let Some(order) = state.orders.find_by_id_mut(id) else {
            tracing::debug!(order_id = %id, trigger = trigger.as_str(), "Attempt for unknown order");
            return;
        };

        if !order.status().is_active() {
            tracing::debug!(
                order_id = %id,
                status = %order.status(),
                trigger = trigger.as_str(),
                "Stale attempt ignored"
            );
            return;
        }

        let decision = match this.fill_engine.decide(order, &*this.random) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(
                    order_id = %id,
                    trigger = trigger.as_str(),
                    error = %e,
                    "Fill attempt failed"
                );
                return;
            }
        };

        let trade = match decision.report.map(|report| order.apply_fill(report)) {
            Some(Ok(trade)) => Some(trade),
            Some(Err(e)) => {
                tracing::warn!(order_id = %id, error = %e, "Fill could not be applied");
                None
            }
            None => None,
        };
        let status = order.status();
        let remaining = order.remaining_quantity();

        if let Some(trade) = &trade {
            tracing::info!(
                order_id = %id,
                trade_id = %trade.id(),
                trigger = trigger.as_str(),
                quantity = %trade.quantity(),
                price = %trade.price(),
                commission = %trade.commission(),
                remaining = %remaining,
                status = %status,
                "Order filled"
            );
            state.orders.record_trade(trade.clone());
        } else {
            tracing::debug!(
                order_id = %id,
                trigger = trigger.as_str(),
                scenario = ?decision.scenario,
                "No fill this attempt"
            );
        }

        let follow_up = if decision.scenario == FillScenario::Partial && status.is_active() {
            this.claim_follow_up(&mut state, id)
        } else {
            None
        };

        if status.is_terminal() {
            state.follow_ups.remove(id);
        }
        let snapshot = if trade.is_some() {
            this.snapshot(&state)
        } else {
            None
        };
        drop(state);

        if let Some(delay) = follow_up {
            tracing::debug!(
                order_id = %id,
                delay_ms = delay.as_millis(),
                "Follow-up attempt scheduled"
            );
            Self::schedule_attempt(this, id.clone(), delay, Trigger::FollowUp);
        }

        this.publish(snapshot);
    }

    /// Count a follow-up against the cap and draw its delay.
    fn claim_follow_up(&self, state: &mut SimulatorState, id: &OrderId) -> Option<Duration> {
        let attempts = state.follow_ups.entry(id.clone()).or_insert(0);

        let cap = self.config.scheduling.max_follow_up_attempts;
        if cap.is_some_and(|max| *attempts >= max) {
            tracing::debug!(order_id = %id, attempts = *attempts, "Follow-up cap reached");
            return None;
        }

        *attempts += 1;
        Some(self.follow_up_delay())
    }

    /// Current order book, if anyone is listening.
    fn snapshot(&self, state: &SimulatorState) -> Option<Vec<Order>> {
        self.bus.has_listeners().then(|| state.orders.list())
    }

    /// Deliver a snapshot taken by [`Inner::snapshot`].
    fn publish(&self, snapshot: Option<Vec<Order>>) {
        if let Some(orders) = snapshot {
            self.bus.publish(orders);
        }
    }
}

fn not_found(id: &OrderId) -> OrderError {
    OrderError::NotFound {
        order_id: id.to_string(),
    }
}
