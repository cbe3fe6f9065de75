//! `/api/achievements/*`: catalog and direct unlocks.

use crate::error::Result;
use crate::game::session::{with_session, with_session_mut};
use crate::routes::reply;
use crate::routes::util::{now_param, parse_form_body, require, to_json};

// ── GET /api/achievements ──────────────────────────────────────────

/// GET /api/achievements: the full catalog with this session's
/// `unlocked` flags.
pub fn handle_get(_query: &str) -> Result<String> {
    with_session(|s| to_json(&s.unlocks().achievements()))
}

// ── POST /api/achievements/unlock ──────────────────────────────────

/// POST /api/achievements/unlock: body: `id={achievement}&now={ms}`.
///
/// For unlocks the host detects itself. Repeats report `granted: null`.
pub fn handle_unlock_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let id = require(&params, "id")?;
    let now = now_param(&params)?;
    with_session_mut(|s| {
        let granted = s.unlock(id, now)?;
        reply(s, now, serde_json::json!({ "granted": granted }))
    })
}
