//! `/api/xp/*` and `/api/action`: the XP ledger.

use crate::error::{Error, Result};
use crate::game::actions::SiteAction;
use crate::game::powerup::PowerUpType;
use crate::game::session::with_session_mut;
use crate::routes::reply;
use crate::routes::util::{
    now_param, parse_form_body, parse_param, parse_query, require, to_json,
};

// ── GET /api/xp ────────────────────────────────────────────────────

/// Handle GET /api/xp?now={ms}
/// Polls timers so a decayed combo or expired power-up never shows, then
/// returns the HUD snapshot.
pub fn handle_get(query: &str) -> Result<String> {
    let params = parse_query(query);
    let now = now_param(&params)?;
    with_session_mut(|s| {
        s.tick(now);
        to_json(&s.hud(now))
    })
}

// ── POST /api/xp/add ───────────────────────────────────────────────

/// Body: `amount={u64}&now={ms}`. Scaled by the live multipliers.
pub fn handle_add_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let amount: u64 = parse_param(&params, "amount")?;
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let gained = s.add_xp(amount, now);
        reply(s, now, serde_json::json!({ "gained": gained }))
    })
}

// ── POST /api/xp/combo ─────────────────────────────────────────────

pub fn handle_combo_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let combo = s.increment_combo(now);
        reply(s, now, serde_json::json!({ "combo": combo }))
    })
}

// ── POST /api/xp/powerup ───────────────────────────────────────────

/// Body: `kind={double-xp|triple-xp|focus|none}&now={ms}`.
pub fn handle_powerup_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let raw = require(&params, "kind")?;
    let kind = match raw {
        "none" => None,
        other => Some(PowerUpType::parse(other).ok_or_else(|| Error::UnknownPowerUp(other.to_string()))?),
    };
    let now = now_param(&params)?;
    with_session_mut(|s| {
        s.set_power_up(kind, now);
        reply(s, now, serde_json::json!({ "powerUp": kind }))
    })
}

// ── POST /api/action ───────────────────────────────────────────────

/// Body: `action={view_project|click_skill|visit_section}&now={ms}`.
pub fn handle_action_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let raw = require(&params, "action")?;
    let action = SiteAction::parse(raw).ok_or_else(|| Error::UnknownAction(raw.to_string()))?;
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let outcome = s.record_action(action, now);
        reply(s, now, outcome)
    })
}
