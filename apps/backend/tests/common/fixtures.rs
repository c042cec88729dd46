//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Inline question set in the JSON wire format.
pub fn inline_questions() -> Value {
    json!([
        {
            "title": "Geography",
            "questions": [
                { "value": 400, "question": "Largest ocean", "answer": "Pacific" },
                { "value": 800, "question": "Capital of Australia", "answer": "Canberra" }
            ]
        },
        {
            "title": "Numbers",
            "questions": [
                { "value": 500, "question": "Legs on a spider", "answer": "8" }
            ]
        }
    ])
}

/// Answer request body.
pub fn answer(player: Option<&str>, text: &str) -> Value {
    match player {
        Some(player) => json!({ "player": player, "answer": text }),
        None => json!({ "answer": text }),
    }
}
