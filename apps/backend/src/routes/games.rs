//! Game endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;
use trivia_core::{parser, GameSession};

/// POST /api/games
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>)> {
    let session = match payload.questions {
        Some(inline) => {
            let set = parser::validate(inline)?;
            GameSession::new(&set, &payload.players, state.settings)?
        }
        None => {
            let set = state.questions.as_ref().ok_or(ApiError::BoardUnavailable)?;
            GameSession::new(set, &payload.players, state.settings)?
        }
    };

    let (id, game) = state.games.insert(session).await;
    Ok((StatusCode::CREATED, Json(GameResponse { id, game })))
}

/// GET /api/games/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>> {
    let game = state.games.snapshot(id).await?;
    Ok(Json(GameResponse { id, game }))
}

/// DELETE /api/games/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.games.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/games/:id/open
pub async fn open(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OpenTileRequest>,
) -> Result<Json<OpenQuestionView>> {
    let view = state
        .games
        .open_tile(id, payload.category, payload.row)
        .await?;
    Ok(Json(view))
}

/// POST /api/games/:id/buzz
pub async fn buzz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BuzzRequest>,
) -> Result<Json<OpenQuestionView>> {
    let view = state.games.buzz(id, &payload.player).await?;
    Ok(Json(view))
}

/// POST /api/games/:id/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<Resolution>> {
    let resolution = state
        .games
        .answer(id, payload.player.as_deref(), &payload.answer)
        .await?;
    Ok(Json(resolution))
}

/// POST /api/games/:id/dismiss
pub async fn dismiss(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resolution>> {
    let resolution = state.games.dismiss(id).await?;
    Ok(Json(resolution))
}
