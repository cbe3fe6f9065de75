//! Pattern detectors: small independent state machines over the raw
//! interaction stream.
//!
//! Each detector owns a bounded window of the inputs it cares about, tests a
//! fixed predicate after every qualifying event, and clears itself on a
//! match. The [`hub::InputHub`] fans every event out to all of them.

use serde::Deserialize;

pub mod coverage;
pub mod dwell;
pub mod geometry;
pub mod hub;
pub mod rhythm;
pub mod secret_word;
pub mod sequence;
pub mod window;

/// Directional button on the hero widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Left,
    Right,
}

/// A click position in page coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Raw interaction events delivered by the host page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Button { label: Button },
    Hover { label: String },
    Click { x: f64, y: f64 },
    Key { code: String },
    Select { item: String },
    ClearSelection,
    DwellStart { target: String },
    DwellEnd { target: String },
    Interact { category: String, item: String },
}

/// A stateful matcher. `observe` returns the achievement id on a match.
pub trait Detector {
    fn name(&self) -> &'static str;

    fn observe(&mut self, event: &InputEvent, now: u64) -> Option<&'static str>;

    /// Poll time-driven state. Most detectors are purely event-driven.
    fn tick(&mut self, _now: u64) -> Option<&'static str> {
        None
    }

    /// Deadline of the next time-driven match, if one is armed.
    fn next_deadline(&self) -> Option<u64> {
        None
    }

    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_deserialize_from_tagged_json() {
        let ev: InputEvent = serde_json::from_str(r#"{"type":"click","x":1.5,"y":2}"#).unwrap();
        assert_eq!(ev, InputEvent::Click { x: 1.5, y: 2.0 });

        let ev: InputEvent = serde_json::from_str(r#"{"type":"button","label":"left"}"#).unwrap();
        assert_eq!(ev, InputEvent::Button { label: Button::Left });

        let ev: InputEvent = serde_json::from_str(r#"{"type":"clear_selection"}"#).unwrap();
        assert_eq!(ev, InputEvent::ClearSelection);

        let ev: InputEvent =
            serde_json::from_str(r#"{"type":"interact","category":"skills","item":"rust"}"#)
                .unwrap();
        assert!(matches!(ev, InputEvent::Interact { .. }));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let ev: Result<InputEvent, _> = serde_json::from_str(r#"{"type":"scroll"}"#);
        assert!(ev.is_err());
    }

    #[test]
    fn point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
