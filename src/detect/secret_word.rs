//! Secret-word detector: first letters of selected items spell a word.
//!
//! The buffer is unbounded: it only empties on a match, an explicit
//! `ClearSelection`, or a hub reset.

use tracing::debug;

use crate::config::detectors::SECRET_WORD;
use crate::detect::{Detector, InputEvent};
use crate::game::achievements::ids;

#[derive(Debug)]
pub struct SecretWordDetector {
    target: String,
    buffer: String,
}

impl SecretWordDetector {
    pub fn new() -> Self {
        Self::with_word(SECRET_WORD)
    }

    pub fn with_word(word: &str) -> Self {
        Self {
            target: word.to_uppercase(),
            buffer: String::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

impl Default for SecretWordDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SecretWordDetector {
    fn name(&self) -> &'static str {
        "secret_word"
    }

    fn observe(&mut self, event: &InputEvent, _now: u64) -> Option<&'static str> {
        match event {
            InputEvent::Select { item } => {
                let first = item.trim().chars().next()?;
                self.buffer.extend(first.to_uppercase());
                if self.buffer == self.target {
                    debug!(word = %self.target, "secret word spelled");
                    self.buffer.clear();
                    return Some(ids::WORDSMITH);
                }
                None
            }
            InputEvent::ClearSelection => {
                self.buffer.clear();
                None
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}
