//! Click-geometry detectors.
//!
//! Both predicates run only on a full window, so the centroid math never sees
//! an empty or short point set.

use tracing::debug;

use crate::config::detectors::{
    CIRCLE_MIN_RADIUS, CIRCLE_POINTS, CIRCLE_TOLERANCE, DIAGONAL_POINTS,
};
use crate::detect::window::Window;
use crate::detect::{Detector, InputEvent, Point};
use crate::game::achievements::ids;

fn click_point(event: &InputEvent) -> Option<Point> {
    match event {
        InputEvent::Click { x, y } => Some(Point::new(*x, *y)),
        _ => None,
    }
}

/// Each click strictly right of and above the previous one (screen y grows down).
pub fn is_rising_diagonal(points: &[Point]) -> bool {
    points.len() >= 2 && points.windows(2).all(|w| w[1].x > w[0].x && w[1].y < w[0].y)
}

/// Points spread evenly around their centroid.
///
/// The radius is the first point's distance to the centroid; every point must
/// lie within `tolerance` of it.
pub fn is_circle(points: &[Point], tolerance: f64, min_radius: f64) -> bool {
    if points.is_empty() {
        return false;
    }
    let n = points.len() as f64;
    let centroid = Point::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    );
    let radius = points[0].distance(centroid);
    if radius < min_radius {
        return false;
    }
    points
        .iter()
        .all(|p| (p.distance(centroid) - radius).abs() <= tolerance)
}

pub struct DiagonalDetector {
    window: Window<Point>,
}

impl DiagonalDetector {
    pub fn new() -> Self {
        Self {
            window: Window::new(DIAGONAL_POINTS),
        }
    }
}

impl Default for DiagonalDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DiagonalDetector {
    fn name(&self) -> &'static str {
        "diagonal"
    }

    fn observe(&mut self, event: &InputEvent, _now: u64) -> Option<&'static str> {
        self.window.push(click_point(event)?);
        if !self.window.is_full() {
            return None;
        }
        let points: Vec<Point> = self.window.iter().copied().collect();
        if is_rising_diagonal(&points) {
            debug!("diagonal matched");
            self.window.clear();
            return Some(ids::RISING_STAR);
        }
        None
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}

pub struct CircleDetector {
    window: Window<Point>,
}

impl CircleDetector {
    pub fn new() -> Self {
        Self {
            window: Window::new(CIRCLE_POINTS),
        }
    }
}

impl Default for CircleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for CircleDetector {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn observe(&mut self, event: &InputEvent, _now: u64) -> Option<&'static str> {
        self.window.push(click_point(event)?);
        if !self.window.is_full() {
            return None;
        }
        let points: Vec<Point> = self.window.iter().copied().collect();
        if is_circle(&points, CIRCLE_TOLERANCE, CIRCLE_MIN_RADIUS) {
            debug!("circle matched");
            self.window.clear();
            return Some(ids::FULL_CIRCLE);
        }
        None
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(x: f64, y: f64) -> InputEvent {
        InputEvent::Click { x, y }
    }

    fn ring(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect()
    }

    #[test]
    fn rising_diagonal_predicate() {
        let up = [
            Point::new(0.0, 100.0),
            Point::new(10.0, 90.0),
            Point::new(20.0, 80.0),
            Point::new(30.0, 70.0),
        ];
        assert!(is_rising_diagonal(&up));

        let flat = [
            Point::new(0.0, 100.0),
            Point::new(10.0, 100.0),
            Point::new(20.0, 80.0),
            Point::new(30.0, 70.0),
        ];
        assert!(!is_rising_diagonal(&flat));
    }

    #[test]
    fn diagonal_detector_needs_four_clicks() {
        let mut d = DiagonalDetector::new();
        assert_eq!(d.observe(&click(0.0, 30.0), 0), None);
        assert_eq!(d.observe(&click(5.0, 20.0), 0), None);
        assert_eq!(d.observe(&click(9.0, 10.0), 0), None);
        assert_eq!(d.observe(&click(12.0, 0.0), 0), Some(ids::RISING_STAR));
        // window cleared; a single further click cannot match
        assert_eq!(d.observe(&click(20.0, -10.0), 0), None);
    }

    #[test]
    fn falling_diagonal_does_not_match() {
        let mut d = DiagonalDetector::new();
        let mut hit = None;
        for i in 0..4 {
            hit = d.observe(&click(i as f64 * 10.0, i as f64 * 10.0), 0);
        }
        assert_eq!(hit, None);
    }

    #[test]
    fn eight_points_on_a_ring_match() {
        let mut d = CircleDetector::new();
        let mut hit = None;
        for p in ring(200.0, 200.0, 100.0, 8) {
            hit = d.observe(&click(p.x, p.y), 0);
        }
        assert_eq!(hit, Some(ids::FULL_CIRCLE));
    }

    #[test]
    fn wobbly_ring_within_tolerance_matches() {
        let mut points = ring(0.0, 0.0, 80.0, 8);
        for (i, p) in points.iter_mut().enumerate().skip(1) {
            let scale = if i % 2 == 0 { 1.15 } else { 0.9 };
            p.x *= scale;
            p.y *= scale;
        }
        assert!(is_circle(&points, CIRCLE_TOLERANCE, CIRCLE_MIN_RADIUS));
    }

    #[test]
    fn collinear_points_do_not_match() {
        let mut d = CircleDetector::new();
        let mut hit = None;
        for i in 0..8 {
            hit = d.observe(&click(i as f64 * 10.0, 0.0), 0);
        }
        assert_eq!(hit, None);
    }

    #[test]
    fn repeated_single_spot_is_not_a_circle() {
        let points = vec![Point::new(5.0, 5.0); 8];
        assert!(!is_circle(&points, CIRCLE_TOLERANCE, CIRCLE_MIN_RADIUS));
    }

    #[test]
    fn circle_needs_a_full_window() {
        let mut d = CircleDetector::new();
        for p in ring(0.0, 0.0, 100.0, 8).into_iter().take(7) {
            assert_eq!(d.observe(&click(p.x, p.y), 0), None);
        }
    }
}
