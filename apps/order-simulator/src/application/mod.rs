//! Application Layer
//!
//! Orchestrates the domain on timers and exposes the simulator surface.
//!
//! - `ports`: Interfaces for randomness and snapshot subscribers
//! - `services`: The simulator and its scheduling, fill and fan-out services
//! - `dto`: Statistics and CSV exports for API boundaries

pub mod dto;
pub mod ports;
pub mod services;
