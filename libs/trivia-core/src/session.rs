//! Game session state.
//!
//! A session owns the board, the players and their scores, and at most one
//! open question. It never drives a clock itself: callers pass `now` in and
//! report expiry through [`GameSession::expire`] with the attempt number they
//! were handed when the question opened.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::board::{Board, TileView};
use crate::error::SessionError;
use crate::grading::grade_answer;
use crate::types::{GameSettings, GradingVerdict, Player, Question, QuestionSet};

pub const MAX_PLAYERS: usize = 8;

/// The question currently in play.
#[derive(Debug, Clone)]
pub struct OpenQuestion {
    pub category: usize,
    pub row: usize,
    pub question: Question,
    /// Increments every time a tile is opened.
    pub attempt: u64,
    /// Index of the player who buzzed in, if any.
    pub buzzed: Option<usize>,
    pub opened_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Answered,
    TimedOut,
    Dismissed,
}

/// How an open question was closed and what it did to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub kind: ResolutionKind,
    pub attempt: u64,
    pub player: Option<String>,
    pub verdict: Option<GradingVerdict>,
    pub delta: i64,
    /// Score of `player` after the delta was applied.
    pub score: Option<i64>,
    pub correct_answer: String,
}

/// Client-facing view of an open question. Never includes the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenQuestionView {
    pub category: usize,
    pub row: usize,
    pub prompt: String,
    pub value: i64,
    pub attempt: u64,
    pub buzzed: Option<String>,
    pub remaining_millis: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub categories: Vec<String>,
    pub tiles: Vec<Vec<TileView>>,
    pub players: Vec<Player>,
    pub open: Option<OpenQuestionView>,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    players: Vec<Player>,
    settings: GameSettings,
    open: Option<OpenQuestion>,
    attempts: u64,
}

impl GameSession {
    pub fn new(
        set: &QuestionSet,
        names: &[String],
        settings: GameSettings,
    ) -> Result<Self, SessionError> {
        if names.is_empty() || names.len() > MAX_PLAYERS {
            return Err(SessionError::PlayerCount { max: MAX_PLAYERS });
        }

        let mut seen = HashSet::new();
        let mut players = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim();
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                return Err(SessionError::InvalidPlayer(name.to_string()));
            }
            players.push(Player::new(name));
        }

        Ok(Self {
            board: Board::new(set),
            players,
            settings,
            open: None,
            attempts: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn open_question(&self) -> Option<&OpenQuestion> {
        self.open.as_ref()
    }

    /// Board exhausted and nothing left in play.
    pub fn is_finished(&self) -> bool {
        self.open.is_none() && self.board.is_cleared()
    }

    /// Open a tile and start its answer window.
    pub fn open_tile(
        &mut self,
        category: usize,
        row: usize,
        now: DateTime<Utc>,
    ) -> Result<&OpenQuestion, SessionError> {
        if self.open.is_some() {
            return Err(SessionError::QuestionOpen);
        }
        let question = self.board.take(category, row)?;
        self.attempts += 1;

        let millis = i64::try_from(self.settings.answer_millis).unwrap_or(i64::MAX);
        let deadline = now
            .checked_add_signed(Duration::milliseconds(millis))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Ok(self.open.insert(OpenQuestion {
            category,
            row,
            question,
            attempt: self.attempts,
            buzzed: None,
            opened_at: now,
            deadline,
        }))
    }

    /// Lock in the answering player. First buzz wins.
    pub fn buzz(&mut self, player: &str) -> Result<(), SessionError> {
        let idx = self.player_index(player)?;
        let open = self.open.as_mut().ok_or(SessionError::NoOpenQuestion)?;
        if let Some(first) = open.buzzed {
            return Err(SessionError::AlreadyBuzzed(self.players[first].name.clone()));
        }
        open.buzzed = Some(idx);
        Ok(())
    }

    /// Grade an answer for the open question and apply the score delta.
    pub fn submit_answer(
        &mut self,
        player: Option<&str>,
        answer: &str,
    ) -> Result<Resolution, SessionError> {
        let open = self.open.as_ref().ok_or(SessionError::NoOpenQuestion)?;
        let idx = self.answerer(open, player)?;

        let verdict = grade_answer(answer, &open.question.answer);
        let value = open.question.value;
        let delta = if verdict.accepted { value } else { value.saturating_neg() };

        let open = self.close()?;
        let score = self.apply(idx, delta);
        Ok(Resolution {
            kind: ResolutionKind::Answered,
            attempt: open.attempt,
            player: Some(self.players[idx].name.clone()),
            verdict: Some(verdict),
            delta,
            score: Some(score),
            correct_answer: open.question.answer,
        })
    }

    /// Close the question as unanswered. Only the attempt that is still open
    /// may expire; a late timer from an earlier question is rejected.
    pub fn expire(&mut self, attempt: u64) -> Result<Resolution, SessionError> {
        let open = self.open.as_ref().ok_or(SessionError::NoOpenQuestion)?;
        if open.attempt != attempt {
            return Err(SessionError::StaleAttempt(attempt));
        }

        let penalized = open.buzzed.or(self.sole_player());
        let value = open.question.value;
        let open = self.close()?;

        let (player, delta, score) = match penalized {
            Some(idx) => {
                let delta = value.saturating_neg();
                let score = self.apply(idx, delta);
                (Some(self.players[idx].name.clone()), delta, Some(score))
            }
            None => (None, 0, None),
        };

        Ok(Resolution {
            kind: ResolutionKind::TimedOut,
            attempt: open.attempt,
            player,
            verdict: None,
            delta,
            score,
            correct_answer: open.question.answer,
        })
    }

    /// Close the question without touching any score.
    pub fn dismiss(&mut self) -> Result<Resolution, SessionError> {
        let open = self.close()?;
        Ok(Resolution {
            kind: ResolutionKind::Dismissed,
            attempt: open.attempt,
            player: None,
            verdict: None,
            delta: 0,
            score: None,
            correct_answer: open.question.answer,
        })
    }

    /// Time left on the open question, clamped at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.open
            .as_ref()
            .map(|o| (o.deadline - now).max(Duration::zero()))
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> GameSnapshot {
        let open = self.open.as_ref().map(|o| OpenQuestionView {
            category: o.category,
            row: o.row,
            prompt: o.question.question.clone(),
            value: o.question.value,
            attempt: o.attempt,
            buzzed: o.buzzed.map(|i| self.players[i].name.clone()),
            remaining_millis: (o.deadline - now).max(Duration::zero()).num_milliseconds(),
        });

        GameSnapshot {
            categories: self.board.titles().to_vec(),
            tiles: self.board.grid(),
            players: self.players.clone(),
            open,
            finished: self.is_finished(),
        }
    }

    fn close(&mut self) -> Result<OpenQuestion, SessionError> {
        self.open.take().ok_or(SessionError::NoOpenQuestion)
    }

    /// Scores clamp at the `i64` bounds.
    fn apply(&mut self, idx: usize, delta: i64) -> i64 {
        let player = &mut self.players[idx];
        player.score = player.score.saturating_add(delta);
        player.score
    }

    fn sole_player(&self) -> Option<usize> {
        (self.players.len() == 1).then_some(0)
    }

    fn player_index(&self, name: &str) -> Result<usize, SessionError> {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .position(|p| p.name.to_lowercase() == wanted)
            .ok_or_else(|| SessionError::UnknownPlayer(name.to_string()))
    }

    fn answerer(&self, open: &OpenQuestion, player: Option<&str>) -> Result<usize, SessionError> {
        let claimed = player.map(|p| self.player_index(p)).transpose()?;
        let expected = match (open.buzzed, self.sole_player()) {
            (Some(idx), _) | (None, Some(idx)) => idx,
            (None, None) => return Err(SessionError::BuzzRequired),
        };
        match claimed {
            Some(idx) if idx != expected => {
                Err(SessionError::NotAnswering(self.players[idx].name.clone()))
            }
            _ => Ok(expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, MatchedBy};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn solo() -> GameSession {
        GameSession::new(&QuestionSet::classic(), &names(&["Ada"]), GameSettings::default())
            .unwrap()
    }

    fn duo() -> GameSession {
        GameSession::new(
            &QuestionSet::classic(),
            &names(&["Ada", "Grace"]),
            GameSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_player_lists() {
        let set = QuestionSet::classic();
        let settings = GameSettings::default();
        assert_eq!(
            GameSession::new(&set, &[], settings).unwrap_err(),
            SessionError::PlayerCount { max: MAX_PLAYERS }
        );
        assert_eq!(
            GameSession::new(&set, &names(&["Ada", " "]), settings).unwrap_err(),
            SessionError::InvalidPlayer(String::new())
        );
        assert_eq!(
            GameSession::new(&set, &names(&["Ada", "ada"]), settings).unwrap_err(),
            SessionError::InvalidPlayer("ada".to_string())
        );
        let crowd: Vec<String> = (0..9).map(|i| format!("p{i}")).collect();
        assert!(GameSession::new(&set, &crowd, settings).is_err());
    }

    #[test]
    fn open_tile_sets_deadline() {
        let mut session = solo();
        let open = session.open_tile(1, 2, now()).unwrap();
        assert_eq!(open.question.answer, "oxygen");
        assert_eq!(open.attempt, 1);
        assert_eq!(open.deadline - open.opened_at, Duration::seconds(30));
        assert_eq!(
            session.remaining(now() + Duration::seconds(10)),
            Some(Duration::seconds(20))
        );
        assert_eq!(
            session.remaining(now() + Duration::seconds(90)),
            Some(Duration::zero())
        );
    }

    #[test]
    fn only_one_question_open_at_a_time() {
        let mut session = solo();
        session.open_tile(0, 0, now()).unwrap();
        assert_eq!(
            session.open_tile(0, 1, now()).unwrap_err(),
            SessionError::QuestionOpen
        );
    }

    #[test]
    fn correct_answer_adds_value() {
        let mut session = solo();
        session.open_tile(0, 1, now()).unwrap();
        let resolution = session.submit_answer(None, "What is thirty?").unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Answered);
        assert_eq!(resolution.delta, 200);
        assert_eq!(resolution.score, Some(200));
        assert_eq!(
            resolution.verdict.unwrap().matched_by,
            MatchedBy::Numeric
        );
        assert!(session.open_question().is_none());
    }

    #[test]
    fn wrong_answer_subtracts_value() {
        let mut session = solo();
        session.open_tile(2, 0, now()).unwrap();
        let resolution = session.submit_answer(Some("Ada"), "George Washington").unwrap();
        assert_eq!(resolution.delta, -100);
        assert_eq!(resolution.correct_answer, "George Washington");
        assert_eq!(session.players()[0].score, -100);
    }

    #[test]
    fn expiry_penalizes_single_player() {
        let mut session = solo();
        let attempt = session.open_tile(1, 2, now()).unwrap().attempt;
        let resolution = session.expire(attempt).unwrap();
        assert_eq!(resolution.kind, ResolutionKind::TimedOut);
        assert_eq!(resolution.player.as_deref(), Some("Ada"));
        assert_eq!(resolution.delta, -300);
        assert_eq!(session.players()[0].score, -300);
    }

    #[test]
    fn stale_expiry_is_ignored() {
        let mut session = solo();
        let first = session.open_tile(0, 0, now()).unwrap().attempt;
        session.submit_answer(None, "what is 4").unwrap();
        assert_eq!(session.expire(first).unwrap_err(), SessionError::NoOpenQuestion);

        session.open_tile(0, 1, now()).unwrap();
        assert_eq!(
            session.expire(first).unwrap_err(),
            SessionError::StaleAttempt(first)
        );
        assert_eq!(session.players()[0].score, 100);
    }

    #[test]
    fn multiplayer_requires_buzz() {
        let mut session = duo();
        session.open_tile(1, 0, now()).unwrap();
        assert_eq!(
            session.submit_answer(Some("Ada"), "what is h2o").unwrap_err(),
            SessionError::BuzzRequired
        );

        session.buzz("grace").unwrap();
        assert_eq!(
            session.buzz("Ada").unwrap_err(),
            SessionError::AlreadyBuzzed("Grace".to_string())
        );
        assert_eq!(
            session.submit_answer(Some("Ada"), "what is h2o").unwrap_err(),
            SessionError::NotAnswering("Ada".to_string())
        );

        let resolution = session.submit_answer(None, "what is h2o").unwrap();
        assert_eq!(resolution.player.as_deref(), Some("Grace"));
        assert_eq!(session.players()[0].score, 0);
        assert_eq!(session.players()[1].score, 100);
    }

    #[test]
    fn multiplayer_expiry_without_buzz_is_free() {
        let mut session = duo();
        let attempt = session.open_tile(0, 0, now()).unwrap().attempt;
        let resolution = session.expire(attempt).unwrap();
        assert_eq!(resolution.player, None);
        assert_eq!(resolution.delta, 0);
        assert!(session.players().iter().all(|p| p.score == 0));
    }

    #[test]
    fn multiplayer_expiry_penalizes_buzzer() {
        let mut session = duo();
        let attempt = session.open_tile(0, 2, now()).unwrap().attempt;
        session.buzz("Ada").unwrap();
        let resolution = session.expire(attempt).unwrap();
        assert_eq!(resolution.player.as_deref(), Some("Ada"));
        assert_eq!(session.players()[0].score, -300);
    }

    #[test]
    fn unknown_player_cannot_buzz() {
        let mut session = duo();
        session.open_tile(0, 0, now()).unwrap();
        assert_eq!(
            session.buzz("Linus").unwrap_err(),
            SessionError::UnknownPlayer("Linus".to_string())
        );
    }

    #[test]
    fn dismiss_keeps_scores_and_tile_used() {
        let mut session = solo();
        session.open_tile(0, 0, now()).unwrap();
        let resolution = session.dismiss().unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Dismissed);
        assert_eq!(resolution.delta, 0);
        assert_eq!(session.players()[0].score, 0);
        assert_eq!(
            session.open_tile(0, 0, now()).unwrap_err(),
            SessionError::TileUsed { category: 0, row: 0 }
        );
        assert_eq!(session.dismiss().unwrap_err(), SessionError::NoOpenQuestion);
    }

    #[test]
    fn snapshot_hides_answer() {
        let mut session = duo();
        session.open_tile(2, 2, now()).unwrap();
        session.buzz("Ada").unwrap();
        let snapshot = session.snapshot(now() + Duration::seconds(5));
        let open = snapshot.open.clone().unwrap();
        assert_eq!(open.prompt, "Ancient civilization that built pyramids");
        assert_eq!(open.buzzed.as_deref(), Some("Ada"));
        assert_eq!(open.remaining_millis, 25_000);
        assert_eq!(snapshot.tiles[2][2], TileView::Used { value: 300 });
        assert!(!serde_json::to_string(&snapshot).unwrap().contains("Egyptians"));
    }

    fn extreme_board(values: &[i64]) -> GameSession {
        let set = QuestionSet::new(vec![Category {
            title: "Edge".to_string(),
            questions: values
                .iter()
                .map(|&value| Question {
                    value,
                    question: "Gas humans breathe in".to_string(),
                    answer: "oxygen".to_string(),
                })
                .collect(),
        }]);
        GameSession::new(&set, &names(&["Ada"]), GameSettings::default()).unwrap()
    }

    #[test]
    fn wrong_answer_on_minimum_value_saturates() {
        let mut session = extreme_board(&[i64::MIN]);
        session.open_tile(0, 0, now()).unwrap();
        let resolution = session.submit_answer(None, "nope").unwrap();
        assert_eq!(resolution.delta, i64::MAX);
        assert_eq!(session.players()[0].score, i64::MAX);
    }

    #[test]
    fn expiry_on_minimum_value_saturates() {
        let mut session = extreme_board(&[i64::MIN]);
        let attempt = session.open_tile(0, 0, now()).unwrap().attempt;
        assert_eq!(session.expire(attempt).unwrap().delta, i64::MAX);
    }

    #[test]
    fn score_clamps_at_maximum() {
        let mut session = extreme_board(&[i64::MAX, i64::MAX]);
        for row in 0..2 {
            session.open_tile(0, row, now()).unwrap();
            let resolution = session.submit_answer(None, "what is oxygen").unwrap();
            assert_eq!(resolution.score, Some(i64::MAX));
        }
        assert_eq!(session.players()[0].score, i64::MAX);
        assert!(session.is_finished());
    }

    #[test]
    fn game_finishes_when_board_cleared() {
        let mut session = solo();
        for category in 0..3 {
            for row in 0..3 {
                session.open_tile(category, row, now()).unwrap();
                assert!(!session.is_finished());
                session.dismiss().unwrap();
            }
        }
        assert!(session.is_finished());
        assert!(session.snapshot(now()).finished);
    }
}
