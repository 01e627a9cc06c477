//! Question bank loading from JSON.
//!
//! Rows may use either snake_case keys or the spreadsheet headers the question
//! sheets are authored with (`Question`, `OptionA`..`OptionD`, `Answer`, ...).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use trivia_core::{QuestionBank, QuestionRecord};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Question bank has no playable questions")]
    Empty,
}

/// One row of the bank file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BankRow {
    #[serde(alias = "ID")]
    id: Option<String>,
    #[serde(alias = "Question")]
    prompt: String,
    #[serde(alias = "OptionA")]
    option_a: Option<String>,
    #[serde(alias = "OptionB")]
    option_b: Option<String>,
    #[serde(alias = "OptionC")]
    option_c: Option<String>,
    #[serde(alias = "OptionD")]
    option_d: Option<String>,
    #[serde(alias = "Answer")]
    answer: String,
    #[serde(alias = "Category")]
    category: Option<String>,
    #[serde(alias = "Difficulty")]
    difficulty: Option<String>,
    #[serde(alias = "Explanation")]
    explanation: Option<String>,
}

/// Either a bare list of rows or `{ "questions": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum BankFile {
    Rows(Vec<BankRow>),
    Wrapped { questions: Vec<BankRow> },
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl BankRow {
    fn into_record(self, index: usize) -> QuestionRecord {
        QuestionRecord {
            id: non_blank(self.id).unwrap_or_else(|| format!("q{}", index + 1)),
            prompt: self.prompt,
            options: [self.option_a, self.option_b, self.option_c, self.option_d],
            correct_answer: self.answer,
            category: non_blank(self.category),
            difficulty: non_blank(self.difficulty),
            explanation: non_blank(self.explanation),
        }
    }
}

/// Parse a bank, keeping row order and at most `limit` playable questions.
pub fn parse_bank(json: &str, limit: usize) -> Result<QuestionBank, BankError> {
    let rows = match serde_json::from_str(json)? {
        BankFile::Rows(rows) => rows,
        BankFile::Wrapped { questions } => questions,
    };

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record(i))
        .collect::<Vec<_>>();

    let bank = QuestionBank::new(records).limit(limit);
    if bank.is_empty() {
        return Err(BankError::Empty);
    }
    Ok(bank)
}

/// Read and parse a bank file.
pub fn load_bank(path: &Path, limit: usize) -> Result<QuestionBank, BankError> {
    let json = std::fs::read_to_string(path)?;
    let bank = parse_bank(&json, limit)?;
    tracing::info!("Loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::GameConfig;

    #[test]
    fn test_parses_sheet_headers() {
        let json = r#"[
            {
                "ID": "42",
                "Question": "Capital of France?",
                "OptionA": "Paris",
                "OptionB": "Lyon",
                "OptionC": "",
                "Answer": "Paris",
                "Category": "Geography",
                "Difficulty": ""
            }
        ]"#;
        let bank = parse_bank(json, 36).unwrap();
        let q = bank.get(0).unwrap();

        assert_eq!(q.id, "42");
        assert_eq!(q.prompt, "Capital of France?");
        assert_eq!(q.option(0), Some("Paris"));
        assert_eq!(q.option(2), None);
        assert_eq!(q.option(3), None);
        assert_eq!(q.category.as_deref(), Some("Geography"));
        assert_eq!(q.difficulty, None);
    }

    #[test]
    fn test_parses_wrapped_snake_case_rows() {
        let json = r#"{ "questions": [
            { "prompt": "2 + 2?", "option_a": "3", "option_b": "4", "answer": "4" }
        ] }"#;
        let bank = parse_bank(json, 36).unwrap();
        assert_eq!(bank.get(0).unwrap().id, "q1");
        assert_eq!(bank.get(0).unwrap().correct_answer, "4");
    }

    #[test]
    fn test_skips_rows_without_basics_and_limits() {
        let json = r#"[
            { "Question": "", "Answer": "x" },
            { "Question": "A?", "Answer": "a" },
            { "Question": "B?", "Answer": "" },
            { "Question": "C?", "Answer": "c" },
            { "Question": "D?", "Answer": "d" }
        ]"#;
        let bank = parse_bank(json, 2).unwrap();
        let ids: Vec<&str> = bank.records().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q2", "q4"]);
    }

    #[test]
    fn test_empty_bank_is_an_error() {
        assert!(matches!(parse_bank("[]", 36), Err(BankError::Empty)));
        assert!(matches!(parse_bank("{", 36), Err(BankError::Json(_))));
    }

    #[test]
    fn test_bundled_bank_fills_a_session() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/questions.json");
        let config = GameConfig::default();
        let bank = load_bank(&path, config.required_questions()).unwrap();

        assert_eq!(bank.len(), config.required_questions());
        bank.ensure_capacity(&config).unwrap();
    }
}
