//! Input hub: the single subscriber for raw interaction events.
//!
//! Every registered detector sees every event exactly once, in dispatch
//! order. Matches come back as achievement ids; the session turns them into
//! unlocks.

use tracing::debug;

use crate::detect::coverage::{CoverageBoard, CoverageProgress, LocalFlags};
use crate::detect::dwell::DwellDetector;
use crate::detect::geometry::{CircleDetector, DiagonalDetector};
use crate::detect::rhythm::RhythmDetector;
use crate::detect::secret_word::SecretWordDetector;
use crate::detect::sequence::{button_sequence, hover_sequence, konami};
use crate::detect::{Detector, InputEvent};

pub struct InputHub {
    detectors: Vec<Box<dyn Detector>>,
    coverage: CoverageBoard<LocalFlags>,
}

impl InputHub {
    /// A hub with no pattern detectors, only coverage tracking.
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
            coverage: CoverageBoard::new(LocalFlags::new()),
        }
    }

    /// The full set of site detectors.
    pub fn standard() -> Self {
        let mut hub = Self::empty();
        hub.register(Box::new(button_sequence()));
        hub.register(Box::new(hover_sequence()));
        hub.register(Box::new(DiagonalDetector::new()));
        hub.register(Box::new(CircleDetector::new()));
        hub.register(Box::new(RhythmDetector::new()));
        hub.register(Box::new(konami()));
        hub.register(Box::new(SecretWordDetector::new()));
        hub.register(Box::new(DwellDetector::new()));
        hub
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors
            .iter()
            .map(|d| d.name())
            .chain(std::iter::once(self.coverage.name()))
            .collect()
    }

    /// Fan `event` out to every detector. Returns the ids that matched.
    pub fn dispatch(&mut self, event: &InputEvent, now: u64) -> Vec<&'static str> {
        let mut matched = Vec::new();
        for detector in &mut self.detectors {
            if let Some(id) = detector.observe(event, now) {
                debug!(detector = detector.name(), id, "detector matched");
                matched.push(id);
            }
        }
        if let Some(id) = self.coverage.observe(event, now) {
            matched.push(id);
        }
        matched
    }

    /// Poll time-driven detectors.
    pub fn tick(&mut self, now: u64) -> Vec<&'static str> {
        self.detectors
            .iter_mut()
            .filter_map(|d| d.tick(now))
            .collect()
    }

    /// Earliest deadline any time-driven detector is waiting on.
    pub fn next_deadline(&self) -> Option<u64> {
        self.detectors.iter().filter_map(|d| d.next_deadline()).min()
    }

    /// Clear one detector's window when only its widget goes away. Returns
    /// false for an unknown name.
    pub fn reset_detector(&mut self, name: &str) -> bool {
        if name == self.coverage.name() {
            self.coverage.reset();
            return true;
        }
        match self.detectors.iter_mut().find(|d| d.name() == name) {
            Some(detector) => {
                debug!(detector = name, "detector reset");
                detector.reset();
                true
            }
            None => false,
        }
    }

    /// Clear every window, e.g. when the whole overlay is torn down.
    pub fn reset(&mut self) {
        for detector in &mut self.detectors {
            detector.reset();
        }
        self.coverage.reset();
    }

    pub fn coverage(&self) -> &CoverageBoard<LocalFlags> {
        &self.coverage
    }

    pub fn coverage_mut(&mut self) -> &mut CoverageBoard<LocalFlags> {
        &mut self.coverage
    }

    pub fn coverage_progress(&self) -> Vec<CoverageProgress> {
        self.coverage.progress()
    }
}

impl Default for InputHub {
    fn default() -> Self {
        Self::standard()
    }
}
