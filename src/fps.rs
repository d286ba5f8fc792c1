//! Frame rate measurement over a rolling one-second window.
//!
//! The counter is deliberately approximate: it counts frame steps and, once
//! a full second has elapsed since the window opened, hands the accumulated
//! count to the caller and restarts the window from the current instant.
//! Time is supplied by the caller on every tick so tests can drive it with
//! a simulated clock.

use std::time::{Duration, Instant};

/// Reporting window length.
const WINDOW: Duration = Duration::from_millis(1000);

/// Rolling one-second frame counter.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    /// Open a counting window starting at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Drop the accumulated count and reopen the window at `now`.
    pub fn restart(&mut self, now: Instant) {
        self.window_start = now;
        self.frames = 0;
    }

    /// Record one frame at `now`.
    ///
    /// Returns `Some(count)` when the window has elapsed: the value is the
    /// number of frames counted in the window just closed, and a fresh
    /// window starts at `now`. The tick that closes a window is not
    /// included in the reported figure.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        if now.duration_since(self.window_start) >= WINDOW {
            let frames = self.frames;
            self.frames = 0;
            self.window_start = now;
            Some(frames)
        } else {
            self.frames += 1;
            None
        }
    }
}
