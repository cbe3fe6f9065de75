//! Power-up catalog: timed XP multipliers. At most one is active at a time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpType {
    DoubleXp,
    TripleXp,
    Focus,
}

/// Static description of a power-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUp {
    #[serde(rename = "type")]
    pub kind: PowerUpType,
    pub name: &'static str,
    pub duration_ms: u64,
    pub multiplier: f64,
    pub color: &'static str,
    pub description: &'static str,
}

pub const POWER_UPS: [PowerUp; 3] = [
    PowerUp {
        kind: PowerUpType::DoubleXp,
        name: "Double XP",
        duration_ms: 30_000,
        multiplier: 2.0,
        color: "#facc15",
        description: "All XP doubled for 30 seconds",
    },
    PowerUp {
        kind: PowerUpType::TripleXp,
        name: "Triple XP",
        duration_ms: 10_000,
        multiplier: 3.0,
        color: "#f97316",
        description: "All XP tripled for 10 seconds",
    },
    PowerUp {
        kind: PowerUpType::Focus,
        name: "Focus",
        duration_ms: 60_000,
        multiplier: 1.5,
        color: "#38bdf8",
        description: "Half again as much XP for a minute",
    },
];

impl PowerUpType {
    pub const ALL: [PowerUpType; 3] = [Self::DoubleXp, Self::TripleXp, Self::Focus];

    pub fn def(self) -> &'static PowerUp {
        match self {
            Self::DoubleXp => &POWER_UPS[0],
            Self::TripleXp => &POWER_UPS[1],
            Self::Focus => &POWER_UPS[2],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DoubleXp => "double-xp",
            Self::TripleXp => "triple-xp",
            Self::Focus => "focus",
        }
    }

    /// Parse the kebab-case name used on the wire.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}
