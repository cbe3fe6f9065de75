//! One-shot deadline timers.
//!
//! WASM runs single-threaded and the host drives time, so a timer is just an
//! optional deadline that its owner polls from `tick(now)`. Cancelling or
//! restarting overwrites the deadline, which means a superseded timer can
//! never fire against state it no longer describes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    /// (Re)start the timer so it fires `duration_ms` after `now`.
    pub fn start(&mut self, now: u64, duration_ms: u64) {
        self.deadline = Some(now.saturating_add(duration_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Milliseconds until the deadline, 0 if already due, `None` if idle.
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Returns true exactly once when the deadline has passed, then disarms.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
