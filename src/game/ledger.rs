//! XP ledger: the single authoritative holder of xp, combo and the active
//! power-up.
//!
//! Multipliers are read from live state at the moment `add_xp` runs, so two
//! rewards dispatched back to back compose in dispatch order. The combo decay
//! and power-up expiry timers belong to the ledger and are polled from
//! [`Ledger::tick`].

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ledger::{COMBO_DECAY_MS, COMBO_STEP, XP_PER_LEVEL};
use crate::game::powerup::{PowerUp, PowerUpType};
use crate::game::timer::Timer;

/// Level for a given xp total. Pure and monotonic in `xp`.
pub fn level_for_xp(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// Timer transitions reported by [`Ledger::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTick {
    pub combo_reset: bool,
    pub power_up_expired: Option<PowerUpType>,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    xp: u64,
    combo: u32,
    power_up: Option<PowerUpType>,
    combo_timer: Timer,
    power_up_timer: Timer,
}

/// Read-only view for the HUD.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpSnapshot {
    pub xp: u64,
    pub level: u64,
    pub combo: u32,
    pub combo_multiplier: f64,
    pub active_power_up: Option<&'static PowerUp>,
    pub power_up_remaining_ms: Option<u64>,
    pub combo_remaining_ms: Option<u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn level(&self) -> u64 {
        level_for_xp(self.xp)
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn active_power_up(&self) -> Option<PowerUpType> {
        self.power_up
    }

    pub fn combo_multiplier(&self) -> f64 {
        (self.combo as f64 * COMBO_STEP).max(1.0)
    }

    pub fn power_up_multiplier(&self) -> f64 {
        self.power_up.map_or(1.0, |p| p.def().multiplier)
    }

    /// Add `amount` scaled by the live combo and power-up multipliers.
    /// Returns the xp actually gained.
    pub fn add_xp(&mut self, amount: u64) -> u64 {
        let gained =
            (amount as f64 * self.combo_multiplier() * self.power_up_multiplier()).round() as u64;
        let before = self.level();
        self.xp = self.xp.saturating_add(gained);
        debug!(amount, gained, xp = self.xp, "xp added");
        if self.level() > before {
            info!(level = self.level(), xp = self.xp, "level up");
        }
        gained
    }

    /// Bump the combo and restart its decay window.
    pub fn increment_combo(&mut self, now: u64) -> u32 {
        self.combo += 1;
        self.combo_timer.start(now, COMBO_DECAY_MS);
        debug!(combo = self.combo, "combo incremented");
        self.combo
    }

    /// Replace the active power-up. `None` clears it. Any previous expiry
    /// timer is dropped.
    pub fn set_power_up(&mut self, kind: Option<PowerUpType>, now: u64) {
        self.power_up_timer.cancel();
        self.power_up = kind;
        if let Some(kind) = kind {
            self.power_up_timer.start(now, kind.def().duration_ms);
            info!(power_up = kind.as_str(), "power-up activated");
        }
    }

    /// Earliest of the combo decay and power-up expiry deadlines.
    pub fn next_deadline(&self) -> Option<u64> {
        [self.combo_timer.deadline(), self.power_up_timer.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Poll the combo decay and power-up expiry timers.
    pub fn tick(&mut self, now: u64) -> LedgerTick {
        let mut out = LedgerTick::default();
        if self.combo_timer.fire(now) {
            debug!(combo = self.combo, "combo decayed");
            self.combo = 0;
            out.combo_reset = true;
        }
        if self.power_up_timer.fire(now) {
            if let Some(kind) = self.power_up.take() {
                info!(power_up = kind.as_str(), "power-up expired");
                out.power_up_expired = Some(kind);
            }
        }
        out
    }

    pub fn snapshot(&self, now: u64) -> XpSnapshot {
        XpSnapshot {
            xp: self.xp,
            level: self.level(),
            combo: self.combo,
            combo_multiplier: self.combo_multiplier(),
            active_power_up: self.power_up.map(PowerUpType::def),
            power_up_remaining_ms: self.power_up_timer.remaining(now),
            combo_remaining_ms: self.combo_timer.remaining(now),
        }
    }
}
