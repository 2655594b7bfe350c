//! Session clock: elapsed whole seconds with pause/resume accumulation.

use std::sync::Arc;
use std::time::Instant;

use roast_traits::clock::Clock;

/// Monotonic elapsed-seconds timer for one roast session.
///
/// Time is derived from the injected [`Clock`] rather than an internal
/// thread: while running, `time()` is the accumulated total plus the whole
/// seconds elapsed since the current start anchor. Stopping flushes the
/// elapsed whole seconds into the accumulated total, so a later `start()`
/// resumes counting instead of resetting.
#[derive(Clone)]
pub struct RoastTimer {
    clock: Arc<dyn Clock + Send + Sync>,
    /// Wall-clock anchor of the current running stretch; `None` while stopped.
    anchor: Option<Instant>,
    accumulated_secs: u64,
}

impl core::fmt::Debug for RoastTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoastTimer")
            .field("running", &self.anchor.is_some())
            .field("accumulated_secs", &self.accumulated_secs)
            .finish()
    }
}

impl RoastTimer {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            clock,
            anchor: None,
            accumulated_secs: 0,
        }
    }

    /// Begin (or resume) counting. Idempotent while already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.clock.now());
            tracing::debug!(accumulated = self.accumulated_secs, "timer started");
        }
    }

    /// Freeze `time()` at the current whole-second value. Idempotent while
    /// already stopped.
    pub fn stop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            self.accumulated_secs += self.clock.secs_since(anchor);
            tracing::debug!(accumulated = self.accumulated_secs, "timer stopped");
        }
    }

    /// Stop and zero the accumulated total.
    pub fn reset(&mut self) {
        self.stop();
        self.accumulated_secs = 0;
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Elapsed whole seconds since session start, excluding paused stretches.
    ///
    /// Derived from a monotonic clock, so the value never moves backward;
    /// `stop()` flushes exactly the whole seconds `time()` already reported.
    pub fn time(&self) -> u64 {
        match self.anchor {
            Some(anchor) => self.accumulated_secs + self.clock.secs_since(anchor),
            None => self.accumulated_secs,
        }
    }
}

/// Render seconds as zero-padded `MM:SS`. Minutes do not roll over into
/// hours; a 90-minute value renders as `90:00`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
