//! Timer scheduling on the Tokio runtime.
//!
//! All timers share one `CancellationToken`, so a single `shutdown()` stops
//! the sweep and every pending fill attempt.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Spawns one-shot and periodic tasks that stop on shutdown.
#[derive(Debug)]
pub struct Scheduler {
    handle: Handle,
    shutdown: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler that spawns onto `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            shutdown: CancellationToken::new(),
        }
    }

    /// Run `task` once after `delay`, unless shut down first.
    pub fn schedule_once<F>(&self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let shutdown = self.shutdown.clone();

        self.handle.spawn(async move {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => {}
                () = tokio::time::sleep(delay) => task(),
            }
        });
    }

    /// Run `task` every `period`, first after one full period.
    ///
    /// Stops when `task` returns `ControlFlow::Break` or on shutdown.
    pub fn schedule_every<F>(&self, period: Duration, mut task: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();

        self.handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = shutdown.cancelled() => break,
                    _ = interval.tick() => {
                        if task().is_break() {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Cancel every pending and future task.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Whether `shutdown` has been called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
