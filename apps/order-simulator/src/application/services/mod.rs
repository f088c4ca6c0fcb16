//! Application Services
//!
//! Application services coordinate domain logic and infrastructure adapters.
//! [`OrderSimulator`] is the entry point; the rest are its collaborators and
//! run on its timers.

mod admission;
mod fill_engine;
mod notification_bus;
mod order_simulator;
mod scheduler;

pub use admission::{Admission, AdmissionService};
pub use fill_engine::{FillDecision, FillEngine, FillScenario};
pub use notification_bus::{NotificationBus, OrderBookSnapshot, Subscription, SubscriptionId};
pub use order_simulator::OrderSimulator;
pub use scheduler::Scheduler;
