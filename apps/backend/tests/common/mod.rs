//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping an in-memory server
//! - Helpers for creating games and driving questions

pub mod fixtures;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use trivia_core::{GameSettings, QuestionSet};
use uuid::Uuid;

use trivia_backend::{app, AppState};

/// Test context holding a server over the full router.
pub struct TestContext {
    pub server: TestServer,
}

impl TestContext {
    /// Server with the classic board and the default 30 second window.
    pub fn new() -> Self {
        Self::with_state(AppState::new(
            Some(QuestionSet::classic()),
            GameSettings::default(),
        ))
    }

    /// Server whose answer window is `answer_millis` long.
    pub fn with_answer_millis(answer_millis: u64) -> Self {
        Self::with_state(AppState::new(
            Some(QuestionSet::classic()),
            GameSettings { answer_millis },
        ))
    }

    /// Server whose default question source failed to load.
    pub fn without_board() -> Self {
        Self::with_state(AppState::new(None, GameSettings::default()))
    }

    pub fn with_state(state: AppState) -> Self {
        let server = TestServer::new(app(state)).expect("Failed to start test server");
        Self { server }
    }

    /// Create a game with the given players and return its ID.
    pub async fn create_game(&self, players: &[&str]) -> Uuid {
        let response = self
            .server
            .post("/api/games")
            .json(&json!({ "players": players }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("game id in response")
    }

    pub async fn open(&self, id: Uuid, category: usize, row: usize) -> Value {
        let response = self
            .server
            .post(&format!("/api/games/{}/open", id))
            .json(&json!({ "category": category, "row": row }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    pub async fn game(&self, id: Uuid) -> Value {
        let response = self.server.get(&format!("/api/games/{}", id)).await;
        response.assert_status_ok();
        response.json()
    }
}
