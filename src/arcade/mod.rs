//! Mini-game engines.
//!
//! Each engine owns its board, its timers and its RNG. The only way out is a
//! [`ScoreSink`] passed into every call that can score: engines know nothing
//! about achievements, combos or the ledger.

use serde::Serialize;

pub mod memory;
pub mod snake;
pub mod snippets;
pub mod typing;

use memory::MemoryGame;
use snake::SnakeGame;
use typing::TypingGame;

/// Embedding contract between an engine and its host.
pub trait ScoreSink {
    fn on_score_update(&mut self, points: u64);
    fn on_game_complete(&mut self);
}

/// Records what an engine reported. Handy for hosts that apply results
/// after the engine call returns, and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLog {
    pub updates: Vec<u64>,
    pub completed: bool,
}

impl ScoreLog {
    pub fn total(&self) -> u64 {
        self.updates.iter().sum()
    }
}

impl ScoreSink for ScoreLog {
    fn on_score_update(&mut self, points: u64) {
        self.updates.push(points);
    }

    fn on_game_complete(&mut self) {
        self.completed = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Memory,
    Snake,
    Typing,
}

impl GameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Snake => "snake",
            Self::Typing => "typing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "memory" => Some(Self::Memory),
            "snake" => Some(Self::Snake),
            "typing" => Some(Self::Typing),
            _ => None,
        }
    }
}

/// The game currently embedded in the page. Dropping it tears down every
/// timer it owns.
#[derive(Debug)]
pub enum ActiveGame {
    Memory(MemoryGame),
    Snake(SnakeGame),
    Typing(TypingGame),
}

impl ActiveGame {
    pub fn start(kind: GameKind, seed: u64, now: u64) -> Self {
        match kind {
            GameKind::Memory => Self::Memory(MemoryGame::new(seed)),
            GameKind::Snake => Self::Snake(SnakeGame::new(seed, now)),
            GameKind::Typing => Self::Typing(TypingGame::new(seed, now)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Self::Memory(_) => GameKind::Memory,
            Self::Snake(_) => GameKind::Snake,
            Self::Typing(_) => GameKind::Typing,
        }
    }

    /// Drive the engine's own timers.
    pub fn tick(&mut self, now: u64, sink: &mut dyn ScoreSink) {
        match self {
            Self::Memory(g) => g.tick(now, sink),
            Self::Snake(g) => g.advance(now, sink),
            Self::Typing(g) => g.tick(now, sink),
        }
    }

    /// The engine's next timer deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match self {
            Self::Memory(g) => g.next_deadline(),
            Self::Snake(g) => g.next_deadline(),
            Self::Typing(g) => g.next_deadline(),
        }
    }

    /// Bound how many overdue steps a stalled engine replays.
    pub fn limit_backlog(&mut self, now: u64) {
        if let Self::Snake(g) = self {
            g.limit_backlog(now);
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let state = match self {
            Self::Memory(g) => serde_json::to_value(g.view()),
            Self::Snake(g) => serde_json::to_value(g.view()),
            Self::Typing(g) => serde_json::to_value(g.view()),
        };
        serde_json::json!({
            "game": self.kind(),
            "state": state.unwrap_or(serde_json::Value::Null),
        })
    }
}
