//! Frame scheduling with an explicit cancellation handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cloneable handle that stops a [`FrameTicker`].
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop before its next frame.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Decides when the next frame is due.
///
/// Frames never overlap: a frame is handed out by [`FrameTicker::poll_frame`]
/// only once the previous deadline has passed. Frames missed while the loop
/// was busy are dropped rather than replayed.
#[derive(Debug)]
pub struct FrameTicker {
    interval: Duration,
    next_frame: Instant,
    cancel: CancelHandle,
}

impl FrameTicker {
    /// Create a ticker whose first frame is due immediately.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
            cancel: CancelHandle::new(),
        }
    }

    /// A handle that cancels this ticker.
    pub fn handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the frame interval; takes effect after the next frame.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Time left before the next frame is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    /// Claim the next frame if it is due and schedule the one after.
    pub fn poll_frame(&mut self, now: Instant) -> bool {
        if !self.is_running() || now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
        true
    }
}
