//! Board layout: one column per category, one row per question slot.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::{Question, QuestionSet};

/// A playable cell on the board.
#[derive(Debug, Clone)]
struct Tile {
    question: Question,
    used: bool,
}

/// Public view of a cell. Hidden cells pad ragged categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TileView {
    Hidden,
    Available { value: i64 },
    Used { value: i64 },
}

/// Grid of tiles built from a question set.
#[derive(Debug, Clone)]
pub struct Board {
    titles: Vec<String>,
    /// Column-major: `columns[category][row]`.
    columns: Vec<Vec<Tile>>,
    rows: usize,
}

impl Board {
    pub fn new(set: &QuestionSet) -> Self {
        let titles = set.categories.iter().map(|c| c.title.clone()).collect();
        let columns: Vec<Vec<Tile>> = set
            .categories
            .iter()
            .map(|c| {
                c.questions
                    .iter()
                    .map(|q| Tile {
                        question: q.clone(),
                        used: false,
                    })
                    .collect()
            })
            .collect();
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            titles,
            columns,
            rows,
        }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Mark a tile as played and return its question.
    pub fn take(&mut self, category: usize, row: usize) -> Result<Question, SessionError> {
        let tile = self.tile(category, row)?;
        if tile.used {
            return Err(SessionError::TileUsed { category, row });
        }
        let question = tile.question.clone();
        self.columns[category][row].used = true;
        Ok(question)
    }

    /// True once every real tile has been played.
    pub fn is_cleared(&self) -> bool {
        self.columns.iter().flatten().all(|t| t.used)
    }

    /// Tiles row by row, matching the on-screen layout.
    pub fn grid(&self) -> Vec<Vec<TileView>> {
        (0..self.rows)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| match column.get(row) {
                        None => TileView::Hidden,
                        Some(t) if t.used => TileView::Used {
                            value: t.question.value,
                        },
                        Some(t) => TileView::Available {
                            value: t.question.value,
                        },
                    })
                    .collect()
            })
            .collect()
    }

    fn tile(&self, category: usize, row: usize) -> Result<&Tile, SessionError> {
        if category >= self.columns.len() || row >= self.rows {
            return Err(SessionError::OutOfRange { category, row });
        }
        self.columns[category]
            .get(row)
            .ok_or(SessionError::EmptyTile { category, row })
    }
}
