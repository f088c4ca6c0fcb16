//! Random Source Port (Driven Port)
//!
//! Every random decision the simulator makes (rejection, jitter, fill
//! scenario, fill fraction, slippage, sweep selection) is drawn through this
//! port so that runs can be reproduced with a seeded or scripted source.

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Uniform value in `[lo, hi)`.
    fn uniform(&self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&self, len: usize) -> usize {
        let scaled = (self.next_unit() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }
}
