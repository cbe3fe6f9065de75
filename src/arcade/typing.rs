//! Typing-Speed: type the snippet exactly before the clock runs out.
//!
//! The round number picks the difficulty tier. Finishing a snippet scores
//! `round(wpm * accuracy * round * tier multiplier * remaining time fraction)`
//! and starts the next round; letting the clock run out ends the game with no
//! completion score for that round.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::arcade::ScoreSink;
use crate::arcade::snippets::{Tier, tier_for_round};
use crate::game::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingStatus {
    Running,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    pub wpm: u32,
    pub accuracy: f64,
    pub score: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TypingGame {
    round: u32,
    target: String,
    input: String,
    started_at: u64,
    clock: Timer,
    status: TypingStatus,
    results: Vec<RoundResult>,
    rng: SmallRng,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingView<'a> {
    pub round: u32,
    pub tier: &'static str,
    pub target: &'a str,
    pub input: &'a str,
    pub accuracy: f64,
    pub time_limit_ms: u64,
    pub status: TypingStatus,
    pub results: &'a [RoundResult],
}

/// Percentage of typed characters equal to the target at the same index.
/// Nothing typed counts as fully accurate.
pub fn accuracy(target: &str, input: &str) -> f64 {
    let typed = input.chars().count();
    if typed == 0 {
        return 100.0;
    }
    let correct = input
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a == b)
        .count();
    correct as f64 * 100.0 / typed as f64
}

/// Words per minute, rounded. A zero elapsed time counts as one millisecond.
pub fn words_per_minute(word_count: usize, elapsed_ms: u64) -> u32 {
    let minutes = elapsed_ms.max(1) as f64 / 60_000.0;
    (word_count as f64 / minutes).round() as u32
}

impl TypingGame {
    pub fn new(seed: u64, now: u64) -> Self {
        let mut game = Self {
            round: 1,
            target: String::new(),
            input: String::new(),
            started_at: now,
            clock: Timer::default(),
            status: TypingStatus::Running,
            results: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        game.start_round(now);
        game
    }

    fn tier(&self) -> &'static Tier {
        tier_for_round(self.round)
    }

    fn start_round(&mut self, now: u64) {
        let tier = self.tier();
        let pick = self.rng.gen_range(0..tier.snippets.len());
        self.target = tier.snippets[pick].to_string();
        self.input.clear();
        self.started_at = now;
        self.clock.start(now, tier.time_limit_ms);
        debug!(round = self.round, tier = tier.name, "typing round started");
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn status(&self) -> TypingStatus {
        self.status
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(&self.target, &self.input)
    }

    /// Replace the typed text. Completes the round on an exact match.
    pub fn input(&mut self, text: &str, now: u64, sink: &mut dyn ScoreSink) -> Option<RoundResult> {
        self.tick(now, sink);
        if self.status != TypingStatus::Running {
            return None;
        }
        self.input.clear();
        self.input.push_str(text);
        if self.input != self.target {
            return None;
        }

        let tier = self.tier();
        let elapsed_ms = now.saturating_sub(self.started_at);
        let wpm = words_per_minute(self.target.split_whitespace().count(), elapsed_ms);
        let accuracy = self.accuracy();
        let remaining = self.clock.remaining(now).unwrap_or(0) as f64 / tier.time_limit_ms as f64;
        let score = (wpm as f64
            * (accuracy / 100.0)
            * self.round as f64
            * tier.multiplier
            * remaining)
            .round() as u64;

        let result = RoundResult {
            round: self.round,
            wpm,
            accuracy,
            score,
            elapsed_ms,
        };
        info!(round = self.round, wpm, score, "typing round complete");
        self.results.push(result);
        sink.on_score_update(score);

        self.round += 1;
        self.start_round(now);
        Some(result)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        match self.status {
            TypingStatus::Running => self.clock.deadline(),
            TypingStatus::Expired => None,
        }
    }

    /// End the game once the round's time limit has passed.
    pub fn tick(&mut self, now: u64, sink: &mut dyn ScoreSink) {
        if self.status == TypingStatus::Running && self.clock.fire(now) {
            self.status = TypingStatus::Expired;
            info!(round = self.round, rounds_won = self.results.len(), "typing clock expired");
            sink.on_game_complete();
        }
    }

    pub fn view(&self) -> TypingView<'_> {
        let tier = self.tier();
        TypingView {
            round: self.round,
            tier: tier.name,
            target: &self.target,
            input: &self.input,
            accuracy: self.accuracy(),
            time_limit_ms: tier.time_limit_ms,
            status: self.status,
            results: &self.results,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_target(&mut self, target: &str) {
        self.target = target.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::ScoreLog;

    const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

    #[test]
    fn accuracy_is_per_index() {
        assert_eq!(accuracy("hello", ""), 100.0);
        assert_eq!(accuracy("hello", "hello"), 100.0);
        assert_eq!(accuracy("hello", "hxllo"), 80.0);
        assert_eq!(accuracy("hello", "he"), 100.0);
        // characters past the target's end are wrong
        assert_eq!(accuracy("hi", "hiya"), 50.0);
    }

    #[test]
    fn wpm_formula() {
        assert_eq!(words_per_minute(10, 30_000), 20);
        assert_eq!(words_per_minute(7, 60_000), 7);
        assert!(words_per_minute(1, 0) > 0);
    }

    #[test]
    fn ten_words_in_thirty_seconds() {
        let mut game = TypingGame::new(1, 0);
        game.set_target(TEN_WORDS);
        let mut log = ScoreLog::default();

        assert!(game.input("one two thre", 10_000, &mut log).is_none());
        let result = game.input(TEN_WORDS, 30_000, &mut log).unwrap();

        assert_eq!(result.wpm, 20);
        assert_eq!(result.accuracy, 100.0);
        // 20 * 1.0 * round 1 * tier 1.0 * (30s left of 60s)
        assert_eq!(result.score, 10);
        assert_eq!(log.updates, vec![10]);
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn completion_advances_tier() {
        let mut game = TypingGame::new(3, 0);
        let mut log = ScoreLog::default();
        let mut now = 0;
        for expected_round in 1..=6 {
            assert_eq!(game.round(), expected_round);
            now += 5_000;
            let target = game.target().to_string();
            assert!(game.input(&target, now, &mut log).is_some());
        }
        let view = game.view();
        assert_eq!(view.tier, "Expert");
        assert_eq!(game.results().len(), 6);
        assert!(!log.completed);
    }

    #[test]
    fn later_rounds_score_more_for_same_speed() {
        let mut game = TypingGame::new(1, 0);
        let mut log = ScoreLog::default();
        game.set_target(TEN_WORDS);
        let first = game.input(TEN_WORDS, 20_000, &mut log).unwrap();
        game.set_target(TEN_WORDS);
        let second = game.input(TEN_WORDS, 40_000, &mut log).unwrap();
        assert_eq!(first.wpm, second.wpm);
        assert!(second.score > first.score);
    }

    #[test]
    fn expiry_ends_game_without_score() {
        let mut game = TypingGame::new(1, 0);
        let mut log = ScoreLog::default();
        game.input("let", 1_000, &mut log);
        game.tick(59_999, &mut log);
        assert_eq!(game.status(), TypingStatus::Running);
        game.tick(60_000, &mut log);
        assert_eq!(game.status(), TypingStatus::Expired);
        assert!(log.completed);
        assert!(log.updates.is_empty());
    }

    #[test]
    fn late_exact_input_does_not_score() {
        let mut game = TypingGame::new(1, 0);
        let mut log = ScoreLog::default();
        let target = game.target().to_string();
        assert!(game.input(&target, 61_000, &mut log).is_none());
        assert_eq!(game.status(), TypingStatus::Expired);
        assert!(log.updates.is_empty());
        assert!(log.completed);
    }
}
