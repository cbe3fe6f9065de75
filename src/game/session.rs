//! Session container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the WASM module alive, so the session persists
//! across `handle_request` calls until the page reloads.
//!
//! Every operation that takes `now` polls all timers first, so a deadline
//! that passed between two requests is applied before the new input.

use std::cell::RefCell;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::arcade::memory::FlipOutcome;
use crate::arcade::snake::Direction;
use crate::arcade::typing::RoundResult;
use crate::arcade::{ActiveGame, GameKind, ScoreSink};
use crate::config::detectors::COMBO_MASTER;
use crate::config::rewards::{GAME_COMPLETE_POWER_UP_CHANCE, GAME_COMPLETE_XP};
use crate::config::snake::CHARMER_SCORE;
use crate::config::typing::SPEED_DEMON_WPM;
use crate::detect::InputEvent;
use crate::detect::hub::InputHub;
use crate::error::{Error, Result};
use crate::game::achievements::{self, ids};
use crate::game::actions::SiteAction;
use crate::game::ledger::{Ledger, XpSnapshot};
use crate::game::powerup::PowerUpType;
use crate::game::unlock::{Notification, UnlockDispatcher};

/// Forwards engine scores straight into the ledger and remembers whether
/// the engine reported completion.
struct LedgerSink<'a> {
    ledger: &'a mut Ledger,
    completed: bool,
}

impl<'a> LedgerSink<'a> {
    fn new(ledger: &'a mut Ledger) -> Self {
        Self {
            ledger,
            completed: false,
        }
    }
}

impl ScoreSink for LedgerSink<'_> {
    fn on_score_update(&mut self, points: u64) {
        self.ledger.add_xp(points);
    }

    fn on_game_complete(&mut self) {
        self.completed = true;
    }
}

/// What a site action paid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub gained: u64,
    pub power_up: Option<PowerUpType>,
}

/// Response body for mutating routes: the HUD plus any unlocks since the
/// last response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hud {
    #[serde(flatten)]
    pub xp: XpSnapshot,
    pub notification: Option<Notification>,
    pub unlocked: Vec<Notification>,
    pub achievements_unlocked: usize,
}

pub struct Session {
    seed: u64,
    ledger: Ledger,
    unlocks: UnlockDispatcher,
    input: InputHub,
    arcade: Option<ActiveGame>,
    rng: SmallRng,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ledger: Ledger::new(),
            unlocks: UnlockDispatcher::new(),
            input: InputHub::standard(),
            arcade: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn unlocks(&self) -> &UnlockDispatcher {
        &self.unlocks
    }

    pub fn input(&self) -> &InputHub {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputHub {
        &mut self.input
    }

    pub fn arcade(&self) -> Option<&ActiveGame> {
        self.arcade.as_ref()
    }

    // --- XP ledger ---

    pub fn add_xp(&mut self, amount: u64, now: u64) -> u64 {
        self.tick(now);
        self.ledger.add_xp(amount)
    }

    pub fn increment_combo(&mut self, now: u64) -> u32 {
        self.tick(now);
        self.bump_combo(now)
    }

    fn bump_combo(&mut self, now: u64) -> u32 {
        let combo = self.ledger.increment_combo(now);
        if combo >= COMBO_MASTER {
            self.unlock_id(ids::COMBO_MASTER, now);
        }
        combo
    }

    pub fn set_power_up(&mut self, kind: Option<PowerUpType>, now: u64) {
        self.tick(now);
        self.ledger.set_power_up(kind, now);
    }

    /// Roll `chance`; on a hit activate a uniformly chosen power-up.
    fn roll_power_up(&mut self, chance: f64, now: u64) -> Option<PowerUpType> {
        if chance <= 0.0 || !self.rng.gen_bool(chance.min(1.0)) {
            return None;
        }
        let kind = *PowerUpType::ALL.choose(&mut self.rng)?;
        self.ledger.set_power_up(Some(kind), now);
        Some(kind)
    }

    /// Combo first, then the base reward at the live multipliers, then the
    /// call site's power-up roll.
    pub fn record_action(&mut self, action: SiteAction, now: u64) -> ActionOutcome {
        self.tick(now);
        let reward = action.reward();
        self.bump_combo(now);
        let gained = self.ledger.add_xp(reward.xp);
        let power_up = self.roll_power_up(reward.power_up_chance, now);
        debug!(action = ?action, gained, "site action recorded");
        ActionOutcome { gained, power_up }
    }

    // --- Achievements ---

    fn unlock_id(&mut self, id: &str, now: u64) -> Option<u64> {
        let def = achievements::find(id)?;
        self.unlocks.unlock(def, &mut self.ledger, now)
    }

    /// Unlock by id. Unknown ids are an error; repeats are absorbed and
    /// return `Ok(None)`.
    pub fn unlock(&mut self, id: &str, now: u64) -> Result<Option<u64>> {
        let def = achievements::find(id).ok_or_else(|| Error::UnknownAchievement(id.to_string()))?;
        self.tick(now);
        Ok(self.unlocks.unlock(def, &mut self.ledger, now))
    }

    // --- Input ---

    /// Fan an interaction out to every detector and unlock whatever matched.
    pub fn dispatch(&mut self, event: &InputEvent, now: u64) -> Vec<&'static str> {
        self.tick(now);
        let matched = self.input.dispatch(event, now);
        for id in &matched {
            self.unlock_id(id, now);
        }
        matched
    }

    // --- Clock ---

    /// Poll every timer the session owns.
    ///
    /// Deadlines that fell due by `now` are applied one at a time in deadline
    /// order, each against the multipliers live at that instant.
    pub fn tick(&mut self, now: u64) {
        if let Some(game) = self.arcade.as_mut() {
            game.limit_backlog(now);
        }
        while let Some(due) = self.next_deadline().filter(|&d| d <= now) {
            self.poll(due);
        }
    }

    /// Earliest armed deadline across the ledger, detectors, notification
    /// and running game.
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.ledger.next_deadline(),
            self.input.next_deadline(),
            self.unlocks.next_deadline(),
            self.arcade.as_ref().and_then(ActiveGame::next_deadline),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Fire whatever is due at `at`. Every timer due at `at` disarms or moves
    /// past it.
    fn poll(&mut self, at: u64) {
        self.ledger.tick(at);
        for id in self.input.tick(at) {
            self.unlock_id(id, at);
        }
        self.unlocks.tick(at);

        let Some(game) = self.arcade.as_mut() else {
            return;
        };
        let mut sink = LedgerSink::new(&mut self.ledger);
        game.tick(at, &mut sink);
        if sink.completed {
            self.finish_game(at);
        }
    }

    // --- Arcade ---

    /// Start `kind`, tearing down whatever was running.
    pub fn start_game(&mut self, kind: GameKind, now: u64) {
        self.tick(now);
        if let Some(old) = self.arcade.take() {
            debug!(game = old.kind().as_str(), "replacing running game");
        }
        let seed = self.rng.r#gen::<u64>();
        self.arcade = Some(ActiveGame::start(kind, seed, now));
        info!(game = kind.as_str(), "game started");
    }

    pub fn exit_game(&mut self) -> bool {
        match self.arcade.take() {
            Some(game) => {
                info!(game = game.kind().as_str(), "game closed");
                true
            }
            None => false,
        }
    }

    pub fn memory_flip(&mut self, index: usize, now: u64) -> Result<FlipOutcome> {
        self.tick(now);
        match self.arcade.as_mut() {
            Some(ActiveGame::Memory(game)) => Ok(game.flip(index, now)),
            other => Err(wrong_game(GameKind::Memory, other.map(|g| g.kind()))),
        }
    }

    pub fn snake_turn(&mut self, dir: Direction, now: u64) -> Result<bool> {
        self.tick(now);
        match self.arcade.as_mut() {
            Some(ActiveGame::Snake(game)) => Ok(game.steer(dir)),
            other => Err(wrong_game(GameKind::Snake, other.map(|g| g.kind()))),
        }
    }

    pub fn typing_input(&mut self, text: &str, now: u64) -> Result<Option<RoundResult>> {
        self.tick(now);
        let game = match self.arcade.as_mut() {
            Some(ActiveGame::Typing(game)) => game,
            other => return Err(wrong_game(GameKind::Typing, other.map(|g| g.kind()))),
        };
        let mut sink = LedgerSink::new(&mut self.ledger);
        let result = game.input(text, now, &mut sink);
        let completed = sink.completed;

        if let Some(round) = result {
            if round.wpm >= SPEED_DEMON_WPM {
                self.unlock_id(ids::SPEED_DEMON, now);
            }
        }
        if completed {
            self.finish_game(now);
        }
        Ok(result)
    }

    /// Completion bonus, the bonus power-up roll and the game's own
    /// achievement.
    fn finish_game(&mut self, now: u64) {
        let Some(kind) = self.arcade.as_ref().map(ActiveGame::kind) else {
            return;
        };
        if let Some(ActiveGame::Typing(g)) = self.arcade.as_ref() {
            if g.results().is_empty() {
                info!("typing clock ran out before any round was won");
                return;
            }
        }
        let gained = self.ledger.add_xp(GAME_COMPLETE_XP);
        self.roll_power_up(GAME_COMPLETE_POWER_UP_CHANCE, now);
        info!(game = kind.as_str(), gained, "game completed");

        let earned = match self.arcade.as_ref() {
            Some(ActiveGame::Memory(_)) => Some(ids::MEMORY_MASTER),
            Some(ActiveGame::Snake(g)) if g.score() >= CHARMER_SCORE => Some(ids::SNAKE_CHARMER),
            Some(ActiveGame::Typing(g)) if g.results().iter().any(|r| r.wpm >= SPEED_DEMON_WPM) => {
                Some(ids::SPEED_DEMON)
            }
            _ => None,
        };
        if let Some(id) = earned {
            self.unlock_id(id, now);
        }
    }

    // --- Views ---

    /// HUD snapshot. Drains the notification outbox.
    pub fn hud(&mut self, now: u64) -> Hud {
        Hud {
            xp: self.ledger.snapshot(now),
            notification: self.unlocks.displayed().cloned(),
            unlocked: self.unlocks.drain_outbox(),
            achievements_unlocked: self.unlocks.unlocked_count(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(0)
    }
}

fn wrong_game(expected: GameKind, active: Option<GameKind>) -> Error {
    match active {
        Some(active) => Error::WrongGame {
            expected: expected.as_str(),
            active: active.as_str(),
        },
        None => Error::NoActiveGame,
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the whole session.
pub fn replace_session(session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = session;
    });
}

/// Start over with a fresh session seeded from `seed`.
pub fn reset_session(seed: u64) {
    info!(seed, "session reset");
    replace_session(Session::new(seed));
}
