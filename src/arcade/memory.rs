//! Memory-Match: find every pair of labeled cards.
//!
//! Two cards face up lock the board until the pair resolves: a match is
//! marked permanently after a short reveal, a mismatch flips back after a
//! longer one. Each match scores `MATCH_POINTS * streak`; a miss resets the
//! streak.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info};

use crate::arcade::ScoreSink;
use crate::config::memory::{DECK, MATCH_POINTS, MATCH_REVEAL_MS, MISMATCH_FLIP_MS};
use crate::game::timer::Timer;

#[derive(Debug, Clone)]
pub struct Card {
    pub label: String,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Debug, Clone)]
struct PendingPair {
    first: usize,
    second: usize,
    is_match: bool,
    timer: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlipOutcome {
    /// Locked board, matched or already face-up card, bad index or finished game.
    Ignored,
    /// First card of a pair turned over.
    Revealed,
    /// Second card turned over; resolves on a later tick.
    PairPending {
        #[serde(rename = "isMatch")]
        is_match: bool,
    },
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    cards: Vec<Card>,
    face_up: Option<usize>,
    pending: Option<PendingPair>,
    streak: u32,
    score: u64,
    moves: u32,
    complete: bool,
}

#[derive(Debug, Serialize)]
pub struct CardView<'a> {
    pub index: usize,
    /// Hidden while the card is face down.
    pub label: Option<&'a str>,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Debug, Serialize)]
pub struct MemoryView<'a> {
    pub cards: Vec<CardView<'a>>,
    pub streak: u32,
    pub score: u64,
    pub moves: u32,
    pub locked: bool,
    pub complete: bool,
}

impl MemoryGame {
    pub fn new(seed: u64) -> Self {
        Self::with_deck(&DECK, seed)
    }

    /// Two cards per label, shuffled uniformly.
    pub fn with_deck(labels: &[&str], seed: u64) -> Self {
        let mut cards: Vec<Card> = labels
            .iter()
            .flat_map(|label| [label, label])
            .map(|label| Card {
                label: label.to_string(),
                flipped: false,
                matched: false,
            })
            .collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        Self {
            cards,
            face_up: None,
            pending: None,
            streak: 0,
            score: 0,
            moves: 0,
            complete: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn flip(&mut self, index: usize, now: u64) -> FlipOutcome {
        if self.complete || self.pending.is_some() {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(index) {
            Some(card) if !card.flipped && !card.matched => {}
            _ => return FlipOutcome::Ignored,
        }
        self.cards[index].flipped = true;

        let Some(first) = self.face_up.take() else {
            self.face_up = Some(index);
            return FlipOutcome::Revealed;
        };

        self.moves += 1;
        let is_match = self.cards[first].label == self.cards[index].label;
        let mut timer = Timer::default();
        timer.start(now, if is_match { MATCH_REVEAL_MS } else { MISMATCH_FLIP_MS });
        self.pending = Some(PendingPair {
            first,
            second: index,
            is_match,
            timer,
        });
        FlipOutcome::PairPending { is_match }
    }

    /// When the pending pair resolves.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.as_ref().and_then(|p| p.timer.deadline())
    }

    /// Resolve a pending pair once its reveal delay has passed.
    pub fn tick(&mut self, now: u64, sink: &mut dyn ScoreSink) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if !pending.timer.fire(now) {
            return;
        }
        let PendingPair {
            first,
            second,
            is_match,
            ..
        } = *pending;
        self.pending = None;

        if is_match {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.streak += 1;
            let points = MATCH_POINTS * self.streak as u64;
            self.score += points;
            debug!(streak = self.streak, points, "memory pair matched");
            sink.on_score_update(points);

            if self.cards.iter().all(|c| c.matched) {
                self.complete = true;
                info!(score = self.score, moves = self.moves, "memory game complete");
                sink.on_game_complete();
            }
        } else {
            self.cards[first].flipped = false;
            self.cards[second].flipped = false;
            self.streak = 0;
        }
    }

    pub fn view(&self) -> MemoryView<'_> {
        MemoryView {
            cards: self
                .cards
                .iter()
                .enumerate()
                .map(|(index, c)| CardView {
                    index,
                    label: (c.flipped || c.matched).then_some(c.label.as_str()),
                    flipped: c.flipped,
                    matched: c.matched,
                })
                .collect(),
            streak: self.streak,
            score: self.score,
            moves: self.moves,
            locked: self.is_locked(),
            complete: self.complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::ScoreLog;

    /// Indices of the two cards carrying `label`.
    fn pair_of(game: &MemoryGame, label: &str) -> (usize, usize) {
        let idx: Vec<usize> = game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.label == label)
            .map(|(i, _)| i)
            .collect();
        (idx[0], idx[1])
    }

    fn mismatched(game: &MemoryGame) -> (usize, usize) {
        let first = &game.cards()[0].label;
        let other = game
            .cards()
            .iter()
            .position(|c| &c.label != first)
            .unwrap();
        (0, other)
    }

    #[test]
    fn deck_has_two_of_each_label() {
        let game = MemoryGame::new(1);
        assert_eq!(game.cards().len(), DECK.len() * 2);
        for label in DECK {
            assert_eq!(game.cards().iter().filter(|c| c.label == label).count(), 2);
        }
    }

    #[test]
    fn shuffle_depends_on_seed() {
        let a: Vec<String> = MemoryGame::new(1).cards().iter().map(|c| c.label.clone()).collect();
        let b: Vec<String> = MemoryGame::new(1).cards().iter().map(|c| c.label.clone()).collect();
        let c: Vec<String> = MemoryGame::new(2).cards().iter().map(|c| c.label.clone()).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn matching_pair_scores_after_reveal() {
        let mut game = MemoryGame::with_deck(&["a", "b"], 3);
        let mut log = ScoreLog::default();
        let (x, y) = pair_of(&game, "a");

        assert_eq!(game.flip(x, 0), FlipOutcome::Revealed);
        assert_eq!(game.flip(y, 100), FlipOutcome::PairPending { is_match: true });

        game.tick(100 + MATCH_REVEAL_MS - 1, &mut log);
        assert!(!game.cards()[x].matched);

        game.tick(100 + MATCH_REVEAL_MS, &mut log);
        assert!(game.cards()[x].matched && game.cards()[y].matched);
        assert_eq!(game.streak(), 1);
        assert_eq!(log.updates, vec![50]);
    }

    #[test]
    fn streak_multiplies_match_points() {
        let mut game = MemoryGame::with_deck(&["a", "b", "c"], 9);
        let mut log = ScoreLog::default();
        let mut now = 0;
        for label in ["a", "b", "c"] {
            let (x, y) = pair_of(&game, label);
            game.flip(x, now);
            game.flip(y, now);
            now += MATCH_REVEAL_MS;
            game.tick(now, &mut log);
        }
        assert_eq!(log.updates, vec![50, 100, 150]);
        assert!(log.completed);
        assert!(game.is_complete());
        assert_eq!(game.score(), 300);
    }

    #[test]
    fn mismatch_flips_back_and_resets_streak() {
        let mut game = MemoryGame::with_deck(&["a", "b", "c"], 4);
        let mut log = ScoreLog::default();

        let (x, y) = pair_of(&game, "a");
        game.flip(x, 0);
        game.flip(y, 0);
        game.tick(MATCH_REVEAL_MS, &mut log);
        assert_eq!(game.streak(), 1);

        // pick two unmatched cards with different labels
        let unmatched: Vec<usize> = (0..game.cards().len())
            .filter(|&i| !game.cards()[i].matched)
            .collect();
        let p = unmatched[0];
        let q = *unmatched
            .iter()
            .find(|&&i| game.cards()[i].label != game.cards()[p].label)
            .unwrap();

        assert_eq!(game.flip(p, 1000), FlipOutcome::Revealed);
        assert_eq!(game.flip(q, 1000), FlipOutcome::PairPending { is_match: false });
        game.tick(1000 + MISMATCH_FLIP_MS - 1, &mut log);
        assert!(game.cards()[p].flipped);
        game.tick(1000 + MISMATCH_FLIP_MS, &mut log);
        assert!(!game.cards()[p].flipped && !game.cards()[q].flipped);
        assert_eq!(game.streak(), 0);
        assert_eq!(log.updates, vec![50]);
    }

    #[test]
    fn board_is_locked_while_pair_pending() {
        let mut game = MemoryGame::new(5);
        let (x, y) = mismatched(&game);
        game.flip(x, 0);
        game.flip(y, 0);
        assert!(game.is_locked());
        let third = (0..game.cards().len()).find(|&i| i != x && i != y).unwrap();
        assert_eq!(game.flip(third, 10), FlipOutcome::Ignored);
        assert!(!game.cards()[third].flipped);
    }

    #[test]
    fn flipping_same_card_twice_is_ignored() {
        let mut game = MemoryGame::new(6);
        assert_eq!(game.flip(0, 0), FlipOutcome::Revealed);
        assert_eq!(game.flip(0, 0), FlipOutcome::Ignored);
        assert_eq!(game.flip(999, 0), FlipOutcome::Ignored);
    }

    #[test]
    fn matched_cards_stay_matched() {
        let mut game = MemoryGame::with_deck(&["a", "b"], 8);
        let mut log = ScoreLog::default();
        let (x, y) = pair_of(&game, "a");
        game.flip(x, 0);
        game.flip(y, 0);
        game.tick(MATCH_REVEAL_MS, &mut log);
        assert_eq!(game.flip(x, 1000), FlipOutcome::Ignored);
        assert!(game.cards()[x].matched);
    }

    #[test]
    fn view_hides_face_down_labels() {
        let mut game = MemoryGame::new(7);
        game.flip(3, 0);
        let view = game.view();
        assert!(view.cards[3].label.is_some());
        assert!(view.cards.iter().filter(|c| c.label.is_some()).count() == 1);
    }
}
