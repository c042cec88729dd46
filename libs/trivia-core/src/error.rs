//! Error types for trivia-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading a question set.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("question outside of a category at line {line}")]
    NoCategory { line: usize },

    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("missing value at line {line}")]
    MissingValue { line: usize },

    #[error("invalid value at line {line}: {value}")]
    InvalidValue { line: usize, value: String },

    #[error("point value {value} is outside 0..={max}")]
    ValueOutOfRange { value: i64, max: i64 },

    #[error("invalid question data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question set is empty")]
    EmptySet,
}

/// Errors raised by game session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a game needs between 1 and {max} players")]
    PlayerCount { max: usize },

    #[error("invalid player name: {0:?}")]
    InvalidPlayer(String),

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("tile ({category}, {row}) is off the board")]
    OutOfRange { category: usize, row: usize },

    #[error("tile ({category}, {row}) has no question")]
    EmptyTile { category: usize, row: usize },

    #[error("tile ({category}, {row}) was already played")]
    TileUsed { category: usize, row: usize },

    #[error("a question is already open")]
    QuestionOpen,

    #[error("no question is open")]
    NoOpenQuestion,

    #[error("{0} already buzzed in")]
    AlreadyBuzzed(String),

    #[error("a player must buzz in before answering")]
    BuzzRequired,

    #[error("{0} did not buzz in")]
    NotAnswering(String),

    #[error("stale timer for attempt {0}")]
    StaleAttempt(u64),
}
