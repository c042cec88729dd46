//! In-memory game store.
//!
//! Every operation on a game runs under the store lock, so a submitted answer
//! and an expiring countdown for the same question cannot interleave: whichever
//! takes the lock first resolves the question, and the other sees it closed.
//!
//! Finished games linger for [`FINISHED_GAME_TTL_SECS`] so clients can read the
//! final scores, then are dropped the next time a game is created.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use trivia_core::{GameSession, GameSnapshot, OpenQuestionView, Resolution, SessionError};

use crate::error::{ApiError, Result};
use crate::services::timer::Countdown;

/// How long a finished game stays readable.
pub const FINISHED_GAME_TTL_SECS: i64 = 600;

struct GameEntry {
    session: GameSession,
    timer: Option<Countdown>,
    finished_at: Option<DateTime<Utc>>,
}

impl GameEntry {
    fn record_finish(&mut self, now: DateTime<Utc>) {
        if self.finished_at.is_none() && self.session.is_finished() {
            self.finished_at = Some(now);
        }
    }

    fn expired(&self, now: DateTime<Utc>) -> bool {
        self.finished_at
            .is_some_and(|at| (now - at).num_seconds() >= FINISHED_GAME_TTL_SECS)
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

#[derive(Default)]
pub struct GameStore {
    games: Mutex<HashMap<Uuid, GameEntry>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: GameSession) -> (Uuid, GameSnapshot) {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let snapshot = session.snapshot(now);

        let mut games = self.games.lock().await;
        prune_finished(&mut games, now);
        games.insert(
            id,
            GameEntry {
                session,
                timer: None,
                finished_at: None,
            },
        );
        tracing::info!(game = %id, "Created game");
        (id, snapshot)
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<GameSnapshot> {
        let games = self.games.lock().await;
        let entry = games.get(&id).ok_or_else(|| not_found(id))?;
        Ok(entry.session.snapshot(Utc::now()))
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        let mut entry = self
            .games
            .lock()
            .await
            .remove(&id)
            .ok_or_else(|| not_found(id))?;
        entry.cancel_timer();
        tracing::info!(game = %id, "Removed game");
        Ok(())
    }

    /// Open a tile and start its countdown.
    pub async fn open_tile(
        self: &Arc<Self>,
        id: Uuid,
        category: usize,
        row: usize,
    ) -> Result<OpenQuestionView> {
        let mut games = self.games.lock().await;
        let entry = games.get_mut(&id).ok_or_else(|| not_found(id))?;

        let now = Utc::now();
        let attempt = entry.session.open_tile(category, row, now)?.attempt;
        let window = Duration::from_millis(entry.session.settings().answer_millis);

        let store = Arc::clone(self);
        entry.cancel_timer();
        entry.timer = Some(Countdown::start(window, attempt, async move {
            store.expire(id, attempt).await;
        }));

        tracing::info!(game = %id, category, row, attempt, "Opened question");
        open_view(&entry.session, now)
    }

    pub async fn buzz(&self, id: Uuid, player: &str) -> Result<OpenQuestionView> {
        let mut games = self.games.lock().await;
        let entry = games.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.session.buzz(player)?;
        tracing::debug!(game = %id, player, "Buzzed in");
        open_view(&entry.session, Utc::now())
    }

    /// Grade an answer. The countdown is stopped as part of resolving.
    pub async fn answer(&self, id: Uuid, player: Option<&str>, answer: &str) -> Result<Resolution> {
        let mut games = self.games.lock().await;
        let entry = games.get_mut(&id).ok_or_else(|| not_found(id))?;

        let resolution = entry.session.submit_answer(player, answer)?;
        entry.cancel_timer();
        entry.record_finish(Utc::now());

        if let Some(verdict) = &resolution.verdict {
            tracing::debug!(
                game = %id,
                normalized_user = %verdict.normalized_user,
                normalized_correct = %verdict.normalized_correct,
                question_form = verdict.question_form,
                edit_distance = verdict.edit_distance,
                matched_by = ?verdict.matched_by,
                "Graded answer"
            );
        }
        tracing::info!(
            game = %id,
            player = resolution.player.as_deref().unwrap_or("-"),
            delta = resolution.delta,
            "Answer resolved"
        );
        Ok(resolution)
    }

    pub async fn dismiss(&self, id: Uuid) -> Result<Resolution> {
        let mut games = self.games.lock().await;
        let entry = games.get_mut(&id).ok_or_else(|| not_found(id))?;
        let resolution = entry.session.dismiss()?;
        entry.cancel_timer();
        entry.record_finish(Utc::now());
        Ok(resolution)
    }

    /// Countdown callback. Returns `None` when the question was already
    /// resolved, the attempt is stale, or the game is gone.
    pub async fn expire(&self, id: Uuid, attempt: u64) -> Option<Resolution> {
        let mut games = self.games.lock().await;
        let entry = games.get_mut(&id)?;

        match entry.session.expire(attempt) {
            Ok(resolution) => {
                // The task running this is the countdown itself; drop the
                // handle rather than aborting it.
                if entry.timer.as_ref().map(Countdown::attempt) == Some(attempt) {
                    entry.timer = None;
                }
                entry.record_finish(Utc::now());
                tracing::info!(
                    game = %id,
                    attempt,
                    player = resolution.player.as_deref().unwrap_or("-"),
                    delta = resolution.delta,
                    "Time's up"
                );
                Some(resolution)
            }
            Err(SessionError::NoOpenQuestion | SessionError::StaleAttempt(_)) => {
                tracing::debug!(game = %id, attempt, "Ignoring stale countdown");
                None
            }
            Err(e) => {
                tracing::warn!(game = %id, attempt, error = %e, "Countdown expiry failed");
                None
            }
        }
    }
}

fn open_view(session: &GameSession, now: chrono::DateTime<Utc>) -> Result<OpenQuestionView> {
    session
        .snapshot(now)
        .open
        .ok_or(ApiError::Session(SessionError::NoOpenQuestion))
}

fn prune_finished(games: &mut HashMap<Uuid, GameEntry>, now: DateTime<Utc>) {
    let before = games.len();
    games.retain(|_, entry| !entry.expired(now));
    let dropped = before - games.len();
    if dropped > 0 {
        tracing::info!(dropped, "Pruned finished games");
    }
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Game {} not found", id))
}
