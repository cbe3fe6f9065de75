//! Literal sequence detectors: button presses, hovered sections and the
//! Konami key sequence all share one shape. The window is exactly as long as
//! the target and matches only when it equals the target in order.

use tracing::debug;

use crate::config::detectors::{BUTTON_SEQUENCE, HOVER_SEQUENCE, KONAMI};
use crate::detect::window::Window;
use crate::detect::{Button, Detector, InputEvent};
use crate::game::achievements::ids;

/// Pulls the symbol this detector watches out of an event, if any.
type Extract<T> = fn(&InputEvent) -> Option<T>;

pub struct SequenceDetector<T> {
    name: &'static str,
    achievement: &'static str,
    target: Vec<T>,
    window: Window<T>,
    extract: Extract<T>,
}

impl<T: PartialEq> SequenceDetector<T> {
    pub fn new(
        name: &'static str,
        achievement: &'static str,
        target: Vec<T>,
        extract: Extract<T>,
    ) -> Self {
        let window = Window::new(target.len());
        Self {
            name,
            achievement,
            target,
            window,
            extract,
        }
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

impl<T: PartialEq> Detector for SequenceDetector<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn observe(&mut self, event: &InputEvent, _now: u64) -> Option<&'static str> {
        let symbol = (self.extract)(event)?;
        self.window.push(symbol);
        if self.window.matches(&self.target) {
            debug!(detector = self.name, "sequence matched");
            self.window.clear();
            return Some(self.achievement);
        }
        None
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}

/// `[left, right, left, left]` on the hero buttons.
pub fn button_sequence() -> SequenceDetector<Button> {
    SequenceDetector::new(
        "button_sequence",
        ids::SECRET_HANDSHAKE,
        BUTTON_SEQUENCE.to_vec(),
        |ev| match ev {
            InputEvent::Button { label } => Some(*label),
            _ => None,
        },
    )
}

/// Hovering the configured sections in order.
pub fn hover_sequence() -> SequenceDetector<String> {
    SequenceDetector::new(
        "hover_sequence",
        ids::PATH_FINDER,
        HOVER_SEQUENCE.iter().map(|s| s.to_string()).collect(),
        |ev| match ev {
            InputEvent::Hover { label } => Some(label.clone()),
            _ => None,
        },
    )
}

/// Normalise single-character keys so `B` and `b` are the same code.
fn key_code(code: &str) -> String {
    if code.chars().count() == 1 {
        code.to_lowercase()
    } else {
        code.to_string()
    }
}

/// The classic ten-key cheat code.
pub fn konami() -> SequenceDetector<String> {
    SequenceDetector::new(
        "konami",
        ids::KONAMI_CODE,
        KONAMI.iter().map(|k| key_code(k)).collect(),
        |ev| match ev {
            InputEvent::Key { code } => Some(key_code(code)),
            _ => None,
        },
    )
}
