//! Stateless grading endpoint

use axum::Json;

use crate::models::{GradeRequest, GradingVerdict};
use trivia_core::grade_answer;

/// POST /api/grade
pub async fn grade(Json(payload): Json<GradeRequest>) -> Json<GradingVerdict> {
    let verdict = grade_answer(&payload.answer, &payload.correct_answer);
    tracing::debug!(
        normalized_user = %verdict.normalized_user,
        normalized_correct = %verdict.normalized_correct,
        question_form = verdict.question_form,
        edit_distance = verdict.edit_distance,
        matched_by = ?verdict.matched_by,
        accepted = verdict.accepted,
        "Graded answer"
    );
    Json(verdict)
}
