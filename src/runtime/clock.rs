//! Time sources for the scheduler.
//!
//! [`TokioClock`] follows tokio's clock, so paused test time drives it.
//! [`ManualClock`] is a shared handle the caller moves forward explicitly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Clock trait
// ---------------------------------------------------------------------------

/// A monotonic time source measured from an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn elapsed(&self) -> Duration;

    /// Move the clock forward by `by`, if the clock can be driven directly.
    ///
    /// Returns `false` for clocks that follow real (or runtime) time; the
    /// caller then has to wait instead.
    fn advance(&self, by: Duration) -> bool {
        let _ = by;
        false
    }
}

// ---------------------------------------------------------------------------
// TokioClock
// ---------------------------------------------------------------------------

/// Clock backed by [`tokio::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    /// Start a clock at the current tokio instant.
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn elapsed(&self) -> Duration {
        tokio::time::Instant::now().saturating_duration_since(self.origin)
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to a [`View`](crate::view::View).
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// A clock stopped at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `by`.
    pub fn tick(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Current reading.
    pub fn now(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }

    fn advance(&self, by: Duration) -> bool {
        self.tick(by);
        true
    }
}
