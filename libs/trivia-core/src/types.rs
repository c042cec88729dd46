//! Core types for the trivia board game.

use serde::{Deserialize, Serialize};

/// A single clue on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Point value, applied as a signed score delta.
    pub value: i64,
    /// Prompt shown to the players.
    pub question: String,
    /// Reference answer used for grading.
    pub answer: String,
}

/// A titled column of questions, ordered top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Full set of categories a board is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    pub categories: Vec<Category>,
}

impl QuestionSet {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Total number of questions across all categories.
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.question_count() == 0
    }

    /// The built-in board used when no external source is configured.
    pub fn classic() -> Self {
        fn q(value: i64, question: &str, answer: &str) -> Question {
            Question {
                value,
                question: question.to_string(),
                answer: answer.to_string(),
            }
        }

        Self::new(vec![
            Category {
                title: "Math".to_string(),
                questions: vec![
                    q(100, "2 + 2", "4"),
                    q(200, "5 x 6", "30"),
                    q(300, "12 / 3", "4"),
                ],
            },
            Category {
                title: "Science".to_string(),
                questions: vec![
                    q(100, "Water's chemical formula", "H2O"),
                    q(200, "The Earth is a ___", "planet"),
                    q(300, "Gas humans breathe in", "oxygen"),
                ],
            },
            Category {
                title: "History".to_string(),
                questions: vec![
                    q(100, "Who was the first US President?", "George Washington"),
                    q(200, "Year WW2 ended", "1945"),
                    q(300, "Ancient civilization that built pyramids", "Egyptians"),
                ],
            },
        ])
    }
}

/// Which acceptance rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    Numeric,
    Substring,
    Fuzzy,
    None,
}

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingVerdict {
    pub accepted: bool,
    /// Whether the raw answer was phrased as a question ("what is ...").
    pub question_form: bool,
    pub normalized_user: String,
    pub normalized_correct: String,
    pub edit_distance: usize,
    pub matched_by: MatchedBy,
}

/// Per-game tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Time a player has to answer an open question.
    pub answer_millis: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            answer_millis: 30_000,
        }
    }
}

impl GameSettings {
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            answer_millis: seconds.saturating_mul(1000),
        }
    }
}

/// A contestant and their running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}
