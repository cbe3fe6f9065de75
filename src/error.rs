use thiserror::Error;

/// Errors raised while decoding a request at the JS bridge.
///
/// The gamification core never fails on its own; these only describe
/// malformed or out-of-place requests.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidParam { name: &'static str, value: String },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unknown game: {0}")]
    UnknownGame(String),

    #[error("Unknown power-up: {0}")]
    UnknownPowerUp(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown achievement: {0}")]
    UnknownAchievement(String),

    #[error("No game is running")]
    NoActiveGame,

    #[error("Expected {expected} to be running, found {active}")]
    WrongGame {
        expected: &'static str,
        active: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
