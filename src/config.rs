//! Tuning constants for the overlay.
//!
//! Grouped by the component that reads them. Reward values and power-up
//! chances are per call site on purpose; they are not derived from a
//! shared formula.

/// XP ledger: levels, combo and decay.
pub mod ledger {
    /// XP needed per level. `level = xp / XP_PER_LEVEL + 1`.
    pub const XP_PER_LEVEL: u64 = 1000;

    /// Combo multiplier per combo step: `max(1, combo * COMBO_STEP)`.
    pub const COMBO_STEP: f64 = 0.5;

    /// Combo resets to 0 this long after the last increment.
    pub const COMBO_DECAY_MS: u64 = 3000;
}

/// Achievement unlock notifications.
pub mod unlock {
    /// How long a notification stays displayed.
    pub const NOTIFICATION_MS: u64 = 3000;
}

/// Pattern detector parameters.
pub mod detectors {
    use crate::detect::Button;

    pub const BUTTON_SEQUENCE: [Button; 4] = [Button::Left, Button::Right, Button::Left, Button::Left];

    pub const HOVER_SEQUENCE: [&str; 3] = ["about", "projects", "contact"];

    /// Clicks in a rising diagonal.
    pub const DIAGONAL_POINTS: usize = 4;

    /// Clicks making up a circle.
    pub const CIRCLE_POINTS: usize = 8;

    /// Allowed deviation of each point from the circle radius.
    pub const CIRCLE_TOLERANCE: f64 = 20.0;

    /// Smallest radius that still counts as a circle.
    pub const CIRCLE_MIN_RADIUS: f64 = 30.0;

    pub const RHYTHM_TARGET_MS: u64 = 500;
    pub const RHYTHM_TOLERANCE_MS: u64 = 50;

    pub const KONAMI: [&str; 10] = [
        "ArrowUp",
        "ArrowUp",
        "ArrowDown",
        "ArrowDown",
        "ArrowLeft",
        "ArrowRight",
        "ArrowLeft",
        "ArrowRight",
        "b",
        "a",
    ];

    /// Spelled by the first letters of selected items.
    pub const SECRET_WORD: &str = "RUST";

    /// Continuous hover needed on one target.
    pub const DWELL_MS: u64 = 10_000;

    /// Combo count that unlocks the combo achievement.
    pub const COMBO_MASTER: u32 = 10;
}

/// Per call site XP rewards and power-up chances.
pub mod rewards {
    pub const VIEW_PROJECT_XP: u64 = 50;
    pub const VIEW_PROJECT_POWER_UP_CHANCE: f64 = 0.20;

    pub const CLICK_SKILL_XP: u64 = 25;
    pub const CLICK_SKILL_POWER_UP_CHANCE: f64 = 0.25;

    pub const VISIT_SECTION_XP: u64 = 10;
    pub const VISIT_SECTION_POWER_UP_CHANCE: f64 = 0.0;

    pub const GAME_COMPLETE_XP: u64 = 100;
    pub const GAME_COMPLETE_POWER_UP_CHANCE: f64 = 0.30;
}

/// Memory-Match.
pub mod memory {
    pub const DECK: [&str; 8] = [
        "crab", "gear", "crate", "lock", "thread", "rocket", "flask", "scroll",
    ];

    /// Points per match, multiplied by the current streak.
    pub const MATCH_POINTS: u64 = 50;

    /// Both cards stay face up this long before being marked matched.
    pub const MATCH_REVEAL_MS: u64 = 600;

    /// Mismatched cards flip back after this long.
    pub const MISMATCH_FLIP_MS: u64 = 1000;
}

/// Snake.
pub mod snake {
    pub const GRID: i32 = 20;
    pub const START: (i32, i32) = (10, 10);

    pub const BASE_TICK_MS: u64 = 150;
    pub const TICK_DECREMENT_MS: u64 = 10;
    pub const MIN_TICK_MS: u64 = 60;

    pub const FOOD_POINTS: u64 = 10;

    /// Every this many cumulative points the tick interval shrinks.
    pub const SPEEDUP_EVERY: u64 = 50;

    /// Steps replayed at most per `advance` call after a stall.
    pub const MAX_CATCH_UP: u32 = 5;

    /// Final score that unlocks the snake achievement.
    pub const CHARMER_SCORE: u64 = 200;
}

/// Typing-Speed.
pub mod typing {
    pub const TIER_COUNT: u32 = 5;

    /// Words per minute that unlocks the typing achievement.
    pub const SPEED_DEMON_WPM: u32 = 60;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detector_windows_are_non_empty() {
        assert_eq!(detectors::BUTTON_SEQUENCE.len(), 4);
        assert_eq!(detectors::KONAMI.len(), 10);
        assert!(detectors::CIRCLE_POINTS >= 3);
        assert!(detectors::CIRCLE_MIN_RADIUS > detectors::CIRCLE_TOLERANCE);
    }

    #[test]
    fn snake_speedup_has_a_floor() {
        assert!(snake::MIN_TICK_MS < snake::BASE_TICK_MS);
        assert_eq!(snake::SPEEDUP_EVERY % snake::FOOD_POINTS, 0);
    }

    #[test]
    fn power_up_chances_are_probabilities() {
        for p in [
            rewards::VIEW_PROJECT_POWER_UP_CHANCE,
            rewards::CLICK_SKILL_POWER_UP_CHANCE,
            rewards::VISIT_SECTION_POWER_UP_CHANCE,
            rewards::GAME_COMPLETE_POWER_UP_CHANCE,
        ] {
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
