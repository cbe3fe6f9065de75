//! Route handlers for the request bridge.
//!
//! Handlers take the raw query or body string and return a JSON body.
//! Mutating routes answer with a [`Reply`]: the HUD snapshot, the drained
//! unlock notifications and whatever the route itself produced.

use serde::Serialize;

use crate::error::Result;
use crate::game::session::{Hud, Session};

pub mod achievements;
pub mod arcade;
pub mod coverage;
pub mod input;
pub mod session;
pub mod util;
pub mod xp;

#[derive(Debug, Serialize)]
pub struct Reply<T: Serialize> {
    #[serde(flatten)]
    pub hud: Hud,
    pub result: T,
}

/// Build the reply for a mutating route. Drains the notification outbox.
pub fn reply<T: Serialize>(session: &mut Session, now: u64, result: T) -> Result<String> {
    util::to_json(&Reply {
        hud: session.hud(now),
        result,
    })
}
