//! Infrastructure Layer
//!
//! Adapters (implementations) for the ports and repository traits:
//!
//! - `persistence/`: In-memory order store
//! - `random/`: System, seeded, and scripted random sources

pub mod persistence;
pub mod random;
