//! Order Execution Domain Services
//!
//! Stateless business logic that doesn't fit in aggregates.

mod admission_rules;
pub mod pricing;

pub use admission_rules::AdmissionRules;
