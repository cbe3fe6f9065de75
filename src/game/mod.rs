//! Session state: XP ledger, timers, achievements and the thread-local
//! session that ties them to the detectors and mini-games.
//!
//! Everything lives in WASM memory for the lifetime of the Web Worker and is
//! rebuilt on page reload.

pub mod achievements;
pub mod actions;
pub mod ledger;
pub mod powerup;
pub mod session;
pub mod timer;
pub mod unlock;
