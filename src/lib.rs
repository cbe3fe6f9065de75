//! XP overlay: in-browser gamification core.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing, the same router engine
//! that powers Axum. Every response is a JSON string.
//!
//! The host owns the clock: each timed route carries `now` in milliseconds
//! and timers are deadlines polled against it.

use wasm_bindgen::prelude::*;

pub mod arcade;
pub mod config;
pub mod detect;
pub mod error;
pub mod game;
pub mod logging;
pub mod routes;

/// Install the tracing subscriber. Call once when the worker boots.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    logging::init_logging();
}

/// Process an HTTP-like request and return a JSON body.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` - HTTP method (`GET` or `POST`)
/// * `path`   - URL path (e.g., "/api/xp")
/// * `query`  - Query string (e.g., "?now=1200")
/// * `body`   - Form or JSON body. Empty string for GET requests.
///
/// # Returns
/// The route's JSON, or `{"error": "..."}`.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/session/start", "session_start").ok();
    router.insert("/api/clock/tick", "clock_tick").ok();

    router.insert("/api/xp", "xp").ok();
    router.insert("/api/xp/add", "xp_add").ok();
    router.insert("/api/xp/combo", "xp_combo").ok();
    router.insert("/api/xp/powerup", "xp_powerup").ok();
    router.insert("/api/action", "action").ok();

    router.insert("/api/input", "input").ok();
    router.insert("/api/input/reset", "input_reset").ok();

    router.insert("/api/achievements", "achievements").ok();
    router.insert("/api/achievements/unlock", "achievements_unlock").ok();

    router.insert("/api/coverage/register", "coverage_register").ok();
    router.insert("/api/coverage/flags", "coverage_flags").ok();
    router.insert("/api/coverage/restore", "coverage_restore").ok();

    router.insert("/api/arcade/start", "arcade_start").ok();
    router.insert("/api/arcade/exit", "arcade_exit").ok();
    router.insert("/api/arcade/state", "arcade_state").ok();
    router.insert("/api/arcade/memory/flip", "memory_flip").ok();
    router.insert("/api/arcade/snake/turn", "snake_turn").ok();
    router.insert("/api/arcade/typing/input", "typing_input").ok();

    let result = match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("session_start", "POST") => routes::session::handle_start_post(body),
            ("clock_tick", "POST") => routes::session::handle_tick_post(body),

            ("xp", "GET") => routes::xp::handle_get(query),
            ("xp_add", "POST") => routes::xp::handle_add_post(body),
            ("xp_combo", "POST") => routes::xp::handle_combo_post(body),
            ("xp_powerup", "POST") => routes::xp::handle_powerup_post(body),
            ("action", "POST") => routes::xp::handle_action_post(body),

            ("input", "POST") => routes::input::handle_post(body),
            ("input_reset", "POST") => routes::input::handle_reset_post(body),

            ("achievements", "GET") => routes::achievements::handle_get(query),
            ("achievements_unlock", "POST") => routes::achievements::handle_unlock_post(body),

            ("coverage_register", "POST") => routes::coverage::handle_register_post(body),
            ("coverage_flags", "GET") => routes::coverage::handle_flags_get(query),
            ("coverage_restore", "POST") => routes::coverage::handle_restore_post(body),

            ("arcade_start", "POST") => routes::arcade::handle_start_post(body),
            ("arcade_exit", "POST") => routes::arcade::handle_exit_post(body),
            ("arcade_state", "GET") => routes::arcade::handle_state_get(query),
            ("memory_flip", "POST") => routes::arcade::handle_memory_flip_post(body),
            ("snake_turn", "POST") => routes::arcade::handle_snake_turn_post(body),
            ("typing_input", "POST") => routes::arcade::handle_typing_input_post(body),

            _ => return method_not_allowed(),
        },
        Err(_) => return not_found(),
    };

    result.unwrap_or_else(|err| {
        tracing::warn!(path, error = %err, "request failed");
        routes::util::error_json(&err)
    })
}

fn not_found() -> String {
    serde_json::json!({ "error": "404 route not found" }).to_string()
}

fn method_not_allowed() -> String {
    serde_json::json!({ "error": "405 method not allowed" }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(s: String) -> serde_json::Value {
        serde_json::from_str(&s).unwrap()
    }

    fn fresh() {
        game::session::reset_session(7);
    }

    #[test]
    fn returns_404_for_unknown_route() {
        let v = json(handle_request("GET", "/api/nonexistent", "", ""));
        assert_eq!(v["error"], "404 route not found");
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let v = json(handle_request("POST", "/api/xp", "", ""));
        assert_eq!(v["error"], "405 method not allowed");
        let out = handle_request("GET", "/api/xp/add", "", "");
        assert!(out.contains("405"));
    }

    #[test]
    fn handler_errors_become_json() {
        fresh();
        let v = json(handle_request("POST", "/api/xp/add", "", "now=0"));
        assert_eq!(v["error"], "Missing parameter: amount");
    }

    #[test]
    fn routes_session_start() {
        let v = json(handle_request("POST", "/api/session/start", "", "seed=9"));
        assert_eq!(v["result"]["seed"], 9);
        assert_eq!(v["xp"], 0);
    }

    #[test]
    fn routes_xp_roundtrip() {
        fresh();
        handle_request("POST", "/api/xp/add", "", "amount=1000&now=0");
        let v = json(handle_request("GET", "/api/xp", "?now=1", ""));
        assert_eq!(v["xp"], 1000);
        assert_eq!(v["level"], 2);
    }

    #[test]
    fn routes_action_and_clock() {
        fresh();
        let v = json(handle_request("POST", "/api/action", "", "action=view_project&now=0"));
        assert_eq!(v["result"]["gained"], 50);
        assert_eq!(v["combo"], 1);
        let v = json(handle_request("POST", "/api/clock/tick", "", "now=3000"));
        assert_eq!(v["combo"], 0);
    }

    #[test]
    fn routes_input_diagonal() {
        fresh();
        let mut last = serde_json::Value::Null;
        for (i, (x, y)) in [(10, 100), (20, 90), (30, 80), (40, 70)].iter().enumerate() {
            last = json(handle_request(
                "POST",
                "/api/input",
                "",
                &format!(r#"{{"now":{},"type":"click","x":{},"y":{}}}"#, i * 50, x, y),
            ));
        }
        assert_eq!(last["result"]["matched"][0], "rising_star");
        assert_eq!(last["unlocked"][0]["id"], "rising_star");
    }

    #[test]
    fn routes_achievements() {
        fresh();
        let v = json(handle_request("POST", "/api/achievements/unlock", "", "id=wordsmith&now=0"));
        assert_eq!(v["unlocked"][0]["id"], "wordsmith");
        let list = json(handle_request("GET", "/api/achievements", "", ""));
        assert!(list.as_array().unwrap().iter().any(|a| a["id"] == "wordsmith" && a["unlocked"] == true));
    }

    #[test]
    fn routes_coverage() {
        fresh();
        handle_request("POST", "/api/coverage/register", "", "category=experience&items=acme");
        handle_request(
            "POST",
            "/api/input",
            "",
            r#"{"now":0,"type":"interact","category":"experience","item":"acme"}"#,
        );
        let flags = json(handle_request("GET", "/api/coverage/flags", "", ""));
        assert_eq!(flags["experience_acme"], true);
        let list = json(handle_request("GET", "/api/achievements", "", ""));
        assert!(list.as_array().unwrap().iter().any(|a| a["id"] == "career_historian" && a["unlocked"] == true));
    }

    #[test]
    fn routes_arcade() {
        fresh();
        let v = json(handle_request("POST", "/api/arcade/start", "", "game=snake&now=0"));
        assert_eq!(v["result"]["game"]["game"], "snake");
        let v = json(handle_request("POST", "/api/arcade/snake/turn", "", "dir=down&now=150"));
        assert_eq!(v["result"]["accepted"], true);
        let state = json(handle_request("GET", "/api/arcade/state", "", ""));
        assert_eq!(state["state"]["body"][0]["x"], 11);
        let v = json(handle_request("POST", "/api/arcade/memory/flip", "", "index=0&now=200"));
        assert!(v["error"].as_str().unwrap().contains("memory"));
        handle_request("POST", "/api/arcade/exit", "", "");
        assert!(json(handle_request("GET", "/api/arcade/state", "", "")).is_null());
    }

    #[test]
    fn init_logging_is_repeatable() {
        init_logging();
        init_logging();
    }
}
