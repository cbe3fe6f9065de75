//! `/api/coverage/*`: exploration coverage flags.
//!
//! The host owns persistence: it restores saved flags on load and reads
//! them back to save. Categories and their item ids are registered by the
//! page that renders them.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::game::session::{with_session, with_session_mut};
use crate::routes::util::{parse_form_body, require, to_json};

// ── POST /api/coverage/register ────────────────────────────────────

/// POST /api/coverage/register: body: `category={name}&items={a,b,c}`.
pub fn handle_register_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    let category = require(&params, "category")?;
    let items: Vec<String> = require(&params, "items")?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    with_session_mut(|s| {
        if !s.input_mut().coverage_mut().register(category, items) {
            return Err(Error::InvalidParam {
                name: "category",
                value: category.to_string(),
            });
        }
        to_json(&s.input().coverage_progress())
    })
}

// ── GET /api/coverage/flags ────────────────────────────────────────

/// GET /api/coverage/flags: every flag set so far, as a JSON object.
pub fn handle_flags_get(_query: &str) -> Result<String> {
    with_session(|s| to_json(s.input().coverage().store()))
}

// ── POST /api/coverage/restore ─────────────────────────────────────

/// POST /api/coverage/restore: body: JSON object of `category_item: bool`.
pub fn handle_restore_post(body: &str) -> Result<String> {
    let flags: BTreeMap<String, bool> = serde_json::from_str(body)?;
    with_session_mut(|s| {
        s.input_mut().coverage_mut().store_mut().restore(flags);
        to_json(&s.input().coverage_progress())
    })
}
