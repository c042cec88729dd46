//! Question set endpoints

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::QuestionSetSummary;
use crate::AppState;

/// GET /api/questions
pub async fn summary(State(state): State<AppState>) -> Result<Json<QuestionSetSummary>> {
    let set = state.questions.as_ref().ok_or(ApiError::BoardUnavailable)?;
    Ok(Json(QuestionSetSummary::from_set(set)))
}
