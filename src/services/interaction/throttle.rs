//! Debounce for intermediate range writes.

use std::time::{Duration, Instant};

/// Coalesces writes to at most one per window.
///
/// Only intermediate writes go through here; the final commit on release
/// bypasses the throttle so the stored state always matches the last
/// pointer position.
#[derive(Debug)]
pub struct WriteThrottle {
    window: Duration,
    last_write: Option<Instant>,
}

impl WriteThrottle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_write: None,
        }
    }

    /// True when a write may go out at `now`; records the write time.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last_write {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_write = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_write = None;
    }
}
