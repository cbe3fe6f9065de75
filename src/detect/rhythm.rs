//! Rhythm detector: two consecutive clicks on the target beat.

use crate::config::detectors::{RHYTHM_TARGET_MS, RHYTHM_TOLERANCE_MS};
use crate::detect::{Detector, InputEvent};
use crate::game::achievements::ids;

#[derive(Debug, Default)]
pub struct RhythmDetector {
    last_click: Option<u64>,
}

impl RhythmDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn on_beat(interval: u64) -> bool {
        interval.abs_diff(RHYTHM_TARGET_MS) <= RHYTHM_TOLERANCE_MS
    }
}

impl Detector for RhythmDetector {
    fn name(&self) -> &'static str {
        "rhythm"
    }

    fn observe(&mut self, event: &InputEvent, now: u64) -> Option<&'static str> {
        if !matches!(event, InputEvent::Click { .. }) {
            return None;
        }
        let previous = self.last_click.replace(now);
        let interval = now.saturating_sub(previous?);
        if Self::on_beat(interval) {
            // A match consumes the beat; the next one needs two fresh clicks.
            self.last_click = None;
            return Some(ids::IN_THE_GROOVE);
        }
        None
    }

    fn reset(&mut self) {
        self.last_click = None;
    }
}
