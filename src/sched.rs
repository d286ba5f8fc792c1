//! Frame scheduling seam.
//!
//! The scene engine never sleeps or spins on its own; it asks a
//! [`FrameScheduler`] for "one tick at the next display refresh" and gets a
//! [`FrameHandle`] back. Stopping the engine cancels the one outstanding
//! handle before any configuration is touched, which is what keeps a stale
//! tick from ever observing half-rebuilt state.
//!
//! The windowed shell backs this with `winit`'s redraw requests;
//! [`ManualScheduler`] backs it with nothing at all, for tests and
//! benchmarks that pump the engine by hand.

use std::cell::Cell;
use std::rc::Rc;

/// Token identifying one scheduled frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub u64);

/// Display-refresh scheduling primitive.
///
/// `schedule` arranges for one future tick and returns a handle; `cancel`
/// retracts a previously scheduled tick. The engine holds at most one
/// outstanding handle at a time.
pub trait FrameScheduler {
    /// Request one tick at the next display refresh.
    fn schedule(&mut self) -> FrameHandle;

    /// Retract a pending tick.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler that does no actual scheduling.
///
/// Ticks are delivered by the caller invoking [`Scene::tick`] directly, so
/// this is the backend for headless runs, integration tests, and benchmarks.
/// Schedule and cancel calls are counted behind shared cells, letting a test
/// keep a clone and observe what the engine did.
///
/// [`Scene::tick`]: crate::scene::Scene::tick
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: Rc<Cell<u64>>,
    scheduled: Rc<Cell<u64>>,
    canceled: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total ticks scheduled so far.
    pub fn scheduled(&self) -> u64 {
        self.scheduled.get()
    }

    /// Total ticks canceled so far.
    pub fn canceled(&self) -> u64 {
        self.canceled.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let id = self.next.get();
        self.next.set(id + 1);
        self.scheduled.set(self.scheduled.get() + 1);
        FrameHandle(id)
    }

    fn cancel(&mut self, _handle: FrameHandle) {
        self.canceled.set(self.canceled.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_distinct() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule();
        let b = sched.schedule();
        assert_ne!(a, b);
        assert_eq!(sched.scheduled(), 2);
    }

    #[test]
    fn test_clones_share_counters() {
        let sched = ManualScheduler::new();
        let mut owned = sched.clone();
        let handle = owned.schedule();
        owned.cancel(handle);
        assert_eq!(sched.scheduled(), 1);
        assert_eq!(sched.canceled(), 1);
    }
}
