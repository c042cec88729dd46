//! Core trivia board library shared by the game backend.
//!
//! Provides:
//! - Answer grading (question-form gate, numeric words, substring, Levenshtein)
//! - Question set loaders (JSON and markdown)
//! - Board layout and game session state with per-player scoring
//! - Shared types (Question, Category, GradingVerdict, etc.)

pub mod board;
pub mod error;
pub mod grading;
pub mod parser;
pub mod session;
pub mod types;

pub use board::{Board, TileView};
pub use error::{ParseError, Result, SessionError};
pub use grading::{
    grade_answer, has_question_form, levenshtein_distance, normalize_answer, normalize_reference,
    number_to_words,
};
pub use parser::{parse, parse_json, parse_markdown, SourceFormat, MAX_POINT_VALUE};
pub use session::{
    GameSession, GameSnapshot, OpenQuestion, OpenQuestionView, Resolution, ResolutionKind,
};
pub use types::{Category, GameSettings, GradingVerdict, MatchedBy, Player, Question, QuestionSet};
