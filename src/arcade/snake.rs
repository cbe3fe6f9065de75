//! Snake on a 20×20 wrapping grid.
//!
//! The body is stored head first. Each step computes the new head, checks it
//! against every occupied cell (tail included) and either ends the game or
//! moves: eating keeps the tail, otherwise the tail is dropped. After game
//! over the state is frozen.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::arcade::ScoreSink;
use crate::config::snake::{
    BASE_TICK_MS, FOOD_POINTS, GRID, MAX_CATCH_UP, MIN_TICK_MS, SPEEDUP_EVERY, START,
    TICK_DECREMENT_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: (self.x + dx).rem_euclid(GRID),
            y: (self.y + dy).rem_euclid(GRID),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Accepts `up`/`down`/`left`/`right` and the DOM arrow key names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" | "ArrowUp" => Some(Self::Up),
            "down" | "ArrowDown" => Some(Self::Down),
            "left" | "ArrowLeft" => Some(Self::Left),
            "right" | "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnakeGame {
    body: VecDeque<Cell>,
    food: Cell,
    /// Direction of the last applied step.
    heading: Direction,
    /// Direction the next step will take.
    queued: Direction,
    interval_ms: u64,
    next_step: u64,
    score: u64,
    over: bool,
    rng: SmallRng,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeView<'a> {
    pub grid: i32,
    pub body: &'a VecDeque<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u64,
    pub interval_ms: u64,
    pub game_over: bool,
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Collided,
    Frozen,
}

impl SnakeGame {
    pub fn new(seed: u64, now: u64) -> Self {
        let start = Cell::new(START.0, START.1);
        let mut game = Self {
            body: VecDeque::from([start]),
            food: start,
            heading: Direction::Right,
            queued: Direction::Right,
            interval_ms: BASE_TICK_MS,
            next_step: now + BASE_TICK_MS,
            score: 0,
            over: false,
            rng: SmallRng::seed_from_u64(seed),
        };
        if let Some(food) = game.random_free_cell() {
            game.food = food;
        }
        game
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Queue a direction change. Reversing straight into the body is ignored.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.over || dir == self.heading.opposite() {
            return false;
        }
        self.queued = dir;
        true
    }

    fn random_free_cell(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = (0..GRID)
            .flat_map(|y| (0..GRID).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.body.contains(c))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.gen_range(0..free.len())])
    }

    /// Advance one cell.
    pub fn step(&mut self, sink: &mut dyn ScoreSink) -> StepOutcome {
        if self.over {
            return StepOutcome::Frozen;
        }
        self.heading = self.queued;
        let head = self.head().step(self.heading);

        if self.body.contains(&head) {
            self.over = true;
            info!(score = self.score, length = self.body.len(), "snake collided");
            sink.on_game_complete();
            return StepOutcome::Collided;
        }

        self.body.push_front(head);
        if head != self.food {
            self.body.pop_back();
            return StepOutcome::Moved;
        }

        self.score += FOOD_POINTS;
        sink.on_score_update(FOOD_POINTS);
        if self.score % SPEEDUP_EVERY == 0 {
            self.interval_ms = self
                .interval_ms
                .saturating_sub(TICK_DECREMENT_MS)
                .max(MIN_TICK_MS);
            debug!(interval_ms = self.interval_ms, "snake sped up");
        }
        match self.random_free_cell() {
            Some(food) => self.food = food,
            None => {
                // Board full: nothing left to eat.
                self.over = true;
                info!(score = self.score, "snake filled the board");
                sink.on_game_complete();
            }
        }
        StepOutcome::Ate
    }

    /// Time of the next scheduled step. Nothing is scheduled once over.
    pub fn next_deadline(&self) -> Option<u64> {
        (!self.over).then_some(self.next_step)
    }

    /// Forget overdue steps beyond the catch-up limit. Afterwards at most
    /// `MAX_CATCH_UP` steps are due at `now`, the last one exactly at `now`.
    pub fn limit_backlog(&mut self, now: u64) {
        if self.over || now < self.next_step {
            return;
        }
        let limit = MAX_CATCH_UP as u64;
        let due = (now - self.next_step) / self.interval_ms + 1;
        if due > limit {
            self.next_step = now - (limit - 1) * self.interval_ms;
        }
    }

    /// Run every step that has come due by `now`. After a long stall only a
    /// few steps are replayed and the schedule restarts from `now`.
    pub fn advance(&mut self, now: u64, sink: &mut dyn ScoreSink) {
        self.limit_backlog(now);
        let mut steps = 0;
        while !self.over && now >= self.next_step {
            if steps == MAX_CATCH_UP {
                self.next_step = now + self.interval_ms;
                break;
            }
            self.step(sink);
            self.next_step += self.interval_ms;
            steps += 1;
        }
    }

    pub fn view(&self) -> SnakeView<'_> {
        SnakeView {
            grid: GRID,
            body: &self.body,
            food: self.food,
            direction: self.queued,
            score: self.score,
            interval_ms: self.interval_ms,
            game_over: self.over,
        }
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, cell: Cell) {
        self.food = cell;
    }
}
