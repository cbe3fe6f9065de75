//! `/api/session/*`: session lifecycle.

use crate::error::Result;
use crate::game::session::{reset_session, with_session_mut};
use crate::routes::reply;
use crate::routes::util::{now_param, parse_form_body, parse_param};

// ── POST /api/session/start ────────────────────────────────────────

/// POST /api/session/start: body: `seed={u64}`.
///
/// Drops the running session (detector windows, timers, games, unlocks) and
/// starts fresh. The seed drives shuffles, food placement and power-up rolls.
pub fn handle_start_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let seed: u64 = parse_param(&params, "seed")?;
    reset_session(seed);
    with_session_mut(|s| reply(s, 0, serde_json::json!({ "seed": seed })))
}

// ── POST /api/clock/tick ───────────────────────────────────────────

/// POST /api/clock/tick: body: `now={ms}`.
///
/// Polls every timer: combo decay, power-up expiry, notification clear,
/// dwell and the running game. The result carries the game state so an
/// animation loop needs a single call per frame.
pub fn handle_tick_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let now = now_param(&params)?;
    with_session_mut(|s| {
        s.tick(now);
        let game = s.arcade().map(|g| g.to_json());
        reply(s, now, serde_json::json!({ "game": game }))
    })
}
