//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use trivia_core::{ParseError, SessionError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Game error: {0}")]
    Session(#[from] SessionError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Board unavailable: no question set is loaded")]
    BoardUnavailable,
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Session(e) => match e {
                SessionError::PlayerCount { .. } | SessionError::InvalidPlayer(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_players")
                }
                SessionError::UnknownPlayer(_) => (StatusCode::NOT_FOUND, "unknown_player"),
                SessionError::OutOfRange { .. } | SessionError::EmptyTile { .. } => {
                    (StatusCode::NOT_FOUND, "no_such_tile")
                }
                _ => (StatusCode::CONFLICT, "conflict"),
            },
            ApiError::Parse(_) => (StatusCode::BAD_REQUEST, "parse_error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BoardUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "board_unavailable"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("game 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_board_unavailable_status() {
        let response = ApiError::BoardUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_session_error_statuses() {
        let cases = [
            (SessionError::PlayerCount { max: 8 }, StatusCode::BAD_REQUEST),
            (SessionError::UnknownPlayer("x".to_string()), StatusCode::NOT_FOUND),
            (SessionError::EmptyTile { category: 0, row: 3 }, StatusCode::NOT_FOUND),
            (SessionError::TileUsed { category: 0, row: 0 }, StatusCode::CONFLICT),
            (SessionError::BuzzRequired, StatusCode::CONFLICT),
            (SessionError::NoOpenQuestion, StatusCode::CONFLICT),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn test_parse_error_status() {
        let response = ApiError::from(ParseError::EmptySet).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiError::from(SessionError::NoOpenQuestion).to_string(),
            "Game error: no question is open"
        );
        assert_eq!(
            ApiError::NotFound("Game 1 not found".to_string()).to_string(),
            "Not found: Game 1 not found"
        );
    }
}
