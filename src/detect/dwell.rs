//! Dwell detector: continuous hover on one target.
//!
//! Hovering a new target cancels the previous accumulation. The detector
//! fires once per hover session; leaving and re-entering starts over.

use tracing::debug;

use crate::config::detectors::DWELL_MS;
use crate::detect::{Detector, InputEvent};
use crate::game::achievements::ids;
use crate::game::timer::Timer;

#[derive(Debug, Default)]
pub struct DwellDetector {
    target: Option<String>,
    started_at: u64,
    timer: Timer,
}

impl DwellDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Accumulated hover time on the current target.
    pub fn dwelled(&self, now: u64) -> u64 {
        if self.timer.is_armed() {
            now.saturating_sub(self.started_at)
        } else {
            0
        }
    }
}

impl Detector for DwellDetector {
    fn name(&self) -> &'static str {
        "dwell"
    }

    fn observe(&mut self, event: &InputEvent, now: u64) -> Option<&'static str> {
        match event {
            InputEvent::DwellStart { target } => {
                if self.target.as_deref() == Some(target.as_str()) {
                    return None;
                }
                self.target = Some(target.clone());
                self.started_at = now;
                self.timer.start(now, DWELL_MS);
            }
            InputEvent::DwellEnd { target } => {
                if self.target.as_deref() == Some(target.as_str()) {
                    self.target = None;
                    self.timer.cancel();
                }
            }
            _ => {}
        }
        None
    }

    fn tick(&mut self, now: u64) -> Option<&'static str> {
        if self.timer.fire(now) {
            debug!(hovered = ?self.target, "dwell threshold reached");
            return Some(ids::DEEP_READER);
        }
        None
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    fn reset(&mut self) {
        self.target = None;
        self.timer.cancel();
    }
}
