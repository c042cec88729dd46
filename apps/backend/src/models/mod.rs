//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from trivia-core
pub use trivia_core::{
    GameSnapshot, GradingVerdict, OpenQuestionView, QuestionSet, Resolution, ResolutionKind,
};

/// POST /api/grade body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub answer: String,
    pub correct_answer: String,
}

/// POST /api/games body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub players: Vec<String>,
    /// Inline board; the server's default set is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<QuestionSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub game: GameSnapshot,
}

/// POST /api/games/:id/open body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTileRequest {
    pub category: usize,
    pub row: usize,
}

/// POST /api/games/:id/buzz body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuzzRequest {
    pub player: String,
}

/// POST /api/games/:id/answer body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Optional in single-player games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    pub answer: String,
}

/// Board outline without prompts or answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetSummary {
    pub categories: Vec<CategorySummary>,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub title: String,
    pub values: Vec<i64>,
}

impl QuestionSetSummary {
    pub fn from_set(set: &QuestionSet) -> Self {
        Self {
            categories: set
                .categories
                .iter()
                .map(|c| CategorySummary {
                    title: c.title.clone(),
                    values: c.questions.iter().map(|q| q.value).collect(),
                })
                .collect(),
            question_count: set.question_count(),
        }
    }
}
