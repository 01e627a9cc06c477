//! Test fixtures and factory functions for creating test data.

use serde_json::json;

use trivia_core::{GameConfig, QuestionBank, QuestionRecord};

/// Generate a bank of `n` questions. Question `i` answers "Answer i" in slot `i % 4`.
pub fn sample_bank(n: usize) -> QuestionBank {
    let records = (0..n)
        .map(|i| {
            let mut options = [
                Some(format!("Answer {i}")),
                Some(format!("Wrong {i}a")),
                Some(format!("Wrong {i}b")),
                Some(format!("Wrong {i}c")),
            ];
            options.rotate_right(i % 4);
            QuestionRecord {
                id: format!("q{i}"),
                prompt: format!("Question {i}?"),
                options,
                correct_answer: format!("Answer {i}"),
                category: Some("General".to_string()),
                difficulty: None,
                explanation: None,
            }
        })
        .collect();
    QuestionBank::new(records)
}

/// Default constants without countdowns or reveal pauses.
pub fn instant_config() -> GameConfig {
    GameConfig {
        countdown_secs: 0,
        answer_reveal_ms: 0,
        ..Default::default()
    }
}

/// Create a create-session request body.
pub fn create_session_request(seed: Option<u64>, shuffle: bool) -> serde_json::Value {
    json!({ "seed": seed, "shuffle": shuffle })
}

/// Create an answer request body.
pub fn answer_request(option: usize) -> serde_json::Value {
    json!({ "option": option })
}

/// Create a tap request body.
pub fn tap_request(side: &str, index: usize) -> serde_json::Value {
    json!({ "side": side, "index": index })
}
