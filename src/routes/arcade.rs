//! `/api/arcade/*`: the embedded mini-games.
//!
//! One game runs at a time. Every mutating route answers with the HUD and
//! the game's current state under `result.game`.

use crate::arcade::GameKind;
use crate::arcade::snake::Direction;
use crate::error::{Error, Result};
use crate::game::session::{Session, with_session, with_session_mut};
use crate::routes::reply;
use crate::routes::util::{get_param, now_param, parse_form_body, parse_param, require};

fn game_json(s: &Session) -> serde_json::Value {
    s.arcade()
        .map(|g| g.to_json())
        .unwrap_or(serde_json::Value::Null)
}

// ── POST /api/arcade/start ─────────────────────────────────────────

/// POST /api/arcade/start: body: `game={memory|snake|typing}&now={ms}`.
/// Tears down whatever game was running.
pub fn handle_start_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let raw = require(&params, "game")?;
    let kind = GameKind::parse(raw).ok_or_else(|| Error::UnknownGame(raw.to_string()))?;
    let now = now_param(&params)?;
    with_session_mut(|s| {
        s.start_game(kind, now);
        let game = game_json(s);
        reply(s, now, serde_json::json!({ "game": game }))
    })
}

// ── POST /api/arcade/exit ──────────────────────────────────────────

/// POST /api/arcade/exit
pub fn handle_exit_post(_body: &str) -> Result<String> {
    with_session_mut(|s| {
        let closed = s.exit_game();
        Ok(serde_json::json!({ "closed": closed }).to_string())
    })
}

// ── GET /api/arcade/state ──────────────────────────────────────────

/// GET /api/arcade/state: `{"game": ..., "state": ...}` or `null`.
pub fn handle_state_get(_query: &str) -> Result<String> {
    with_session(|s| Ok(game_json(s).to_string()))
}

// ── POST /api/arcade/memory/flip ───────────────────────────────────

/// POST /api/arcade/memory/flip: body: `index={card}&now={ms}`.
pub fn handle_memory_flip_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let index: usize = parse_param(&params, "index")?;
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let outcome = s.memory_flip(index, now)?;
        let game = game_json(s);
        reply(s, now, serde_json::json!({ "flip": outcome, "game": game }))
    })
}

// ── POST /api/arcade/snake/turn ────────────────────────────────────

/// POST /api/arcade/snake/turn: body: `dir={up|down|left|right}&now={ms}`.
/// Arrow key names are accepted too.
pub fn handle_snake_turn_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let raw = require(&params, "dir")?;
    let dir = Direction::parse(raw).ok_or_else(|| Error::InvalidParam {
        name: "dir",
        value: raw.to_string(),
    })?;
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let accepted = s.snake_turn(dir, now)?;
        let game = game_json(s);
        reply(s, now, serde_json::json!({ "accepted": accepted, "game": game }))
    })
}

// ── POST /api/arcade/typing/input ──────────────────────────────────

/// POST /api/arcade/typing/input: body: `text={typed}&now={ms}`.
/// An empty `text` clears the input.
pub fn handle_typing_input_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let text = get_param(&params, "text").unwrap_or("");
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let round = s.typing_input(text, now)?;
        let game = game_json(s);
        reply(s, now, serde_json::json!({ "round": round, "game": game }))
    })
}
