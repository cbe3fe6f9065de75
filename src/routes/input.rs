//! `/api/input/*`: raw interaction events for the pattern detectors.

use serde::Deserialize;

use crate::detect::InputEvent;
use crate::error::{Error, Result};
use crate::game::session::with_session_mut;
use crate::routes::reply;
use crate::routes::util::{get_param, parse_form_body};

/// JSON body: the tagged event plus the host clock, e.g.
/// `{"now": 1200, "type": "click", "x": 40, "y": 80}`.
#[derive(Debug, Deserialize)]
struct InputRequest {
    now: u64,
    #[serde(flatten)]
    event: InputEvent,
}

// ── POST /api/input ────────────────────────────────────────────────

/// POST /api/input
pub fn handle_post(body: &str) -> Result<String> {
    let req: InputRequest = serde_json::from_str(body)?;
    with_session_mut(|s| {
        let matched = s.dispatch(&req.event, req.now);
        reply(s, req.now, serde_json::json!({ "matched": matched }))
    })
}

// ── POST /api/input/reset ──────────────────────────────────────────

/// POST /api/input/reset: body: `detector={name}` (optional).
/// Clears the named detector, or every detector window when no name is
/// given (widget teardown). Coverage flags and unlocks are kept.
pub fn handle_reset_post(body: &str) -> Result<String> {
    let params = parse_form_body(body);
    with_session_mut(|s| match get_param(&params, "detector").filter(|d| !d.is_empty()) {
        Some(name) => {
            if !s.input_mut().reset_detector(name) {
                return Err(Error::InvalidParam {
                    name: "detector",
                    value: name.to_string(),
                });
            }
            Ok(serde_json::json!({ "reset": name }).to_string())
        }
        None => {
            s.input_mut().reset();
            Ok(serde_json::json!({ "reset": "all" }).to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::{reset_session, with_session};

    fn post(body: &str) -> serde_json::Value {
        serde_json::from_str(&handle_post(body).unwrap()).unwrap()
    }

    #[test]
    fn konami_unlocks_through_the_bridge() {
        reset_session(1);
        let keys = [
            "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight",
            "ArrowLeft", "ArrowRight", "b", "a",
        ];
        let mut last = serde_json::Value::Null;
        for (i, key) in keys.iter().enumerate() {
            last = post(&format!(r#"{{"now":{},"type":"key","code":"{}"}}"#, i * 100, key));
        }
        assert_eq!(last["result"]["matched"][0], "konami_code");
        assert_eq!(last["unlocked"][0]["id"], "konami_code");
        assert_eq!(last["notification"]["xpReward"], 500);
        assert_eq!(last["xp"], 500);
    }

    #[test]
    fn reset_forgets_partial_sequences() {
        reset_session(1);
        post(r#"{"now":0,"type":"hover","label":"about"}"#);
        post(r#"{"now":1,"type":"hover","label":"projects"}"#);
        handle_reset_post("").unwrap();
        let v = post(r#"{"now":2,"type":"hover","label":"contact"}"#);
        assert!(v["result"]["matched"].as_array().unwrap().is_empty());
        assert_eq!(with_session(|s| s.unlocks().unlocked_count()), 0);
    }

    #[test]
    fn reset_of_one_detector_keeps_konami_progress() {
        reset_session(1);
        let keys = [
            "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight",
            "ArrowLeft", "ArrowRight", "b",
        ];
        for (i, key) in keys.iter().enumerate() {
            post(&format!(r#"{{"now":{},"type":"key","code":"{}"}}"#, i * 100, key));
        }
        let out: serde_json::Value =
            serde_json::from_str(&handle_reset_post("detector=button_sequence").unwrap()).unwrap();
        assert_eq!(out["reset"], "button_sequence");

        let last = post(r#"{"now":1000,"type":"key","code":"a"}"#);
        assert_eq!(last["result"]["matched"][0], "konami_code");
    }

    #[test]
    fn reset_of_unknown_detector_is_rejected() {
        reset_session(1);
        assert!(matches!(
            handle_reset_post("detector=telepathy"),
            Err(Error::InvalidParam { name: "detector", .. })
        ));
        let out: serde_json::Value = serde_json::from_str(&handle_reset_post("").unwrap()).unwrap();
        assert_eq!(out["reset"], "all");
    }

    #[test]
    fn malformed_event_is_rejected() {
        assert!(matches!(
            handle_post(r#"{"now":0,"type":"teleport"}"#),
            Err(Error::InvalidJson(_))
        ));
        assert!(handle_post(r#"{"type":"click","x":1,"y":2}"#).is_err());
    }
}
