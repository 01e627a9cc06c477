//! Strategies for choosing which questions of a block become match pairs.

pub mod confusable;
pub mod ordered;
pub mod random;

use serde::{Deserialize, Serialize};

use crate::shuffle::Shuffler;
use crate::types::QuestionRecord;

/// Trait for pair selection strategies.
pub trait PairSelector: Send + Sync {
    /// Strategy identifier.
    fn name(&self) -> &'static str;

    /// Indices into `block` of the questions to use as pairs, at most `count` of them.
    fn select(&self, block: &[QuestionRecord], count: usize, shuffler: &mut Shuffler)
        -> Vec<usize>;
}

/// Configurable pair selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairSelection {
    /// First questions of the block, in bank order.
    Ordered,
    Random,
    /// Questions whose answers look most like the rest of the block.
    Confusable,
}

impl Default for PairSelection {
    fn default() -> Self {
        Self::Ordered
    }
}

impl PairSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Random => "random",
            Self::Confusable => "confusable",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ordered" => Some(Self::Ordered),
            "random" => Some(Self::Random),
            "confusable" => Some(Self::Confusable),
            _ => None,
        }
    }

    /// Strategy implementation for this setting.
    pub fn selector(self) -> Box<dyn PairSelector> {
        match self {
            Self::Ordered => Box::new(ordered::Ordered),
            Self::Random => Box::new(random::Random),
            Self::Confusable => Box::new(confusable::Confusable::default()),
        }
    }
}

/// Get selector by name.
pub fn get_selector(name: &str) -> Option<Box<dyn PairSelector>> {
    PairSelection::from_str(name).map(PairSelection::selector)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::QuestionRecord;

    pub fn question(id: usize, prompt: &str, answer: &str, wrong: [&str; 3]) -> QuestionRecord {
        QuestionRecord {
            id: format!("q{id}"),
            prompt: prompt.to_string(),
            options: [
                Some(answer.to_string()),
                Some(wrong[0].to_string()),
                Some(wrong[1].to_string()),
                Some(wrong[2].to_string()),
            ],
            correct_answer: answer.to_string(),
            category: None,
            difficulty: None,
            explanation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for selection in [
            PairSelection::Ordered,
            PairSelection::Random,
            PairSelection::Confusable,
        ] {
            assert_eq!(PairSelection::from_str(selection.as_str()), Some(selection));
            assert_eq!(selection.selector().name(), selection.as_str());
        }
        assert!(get_selector("alphabetical").is_none());
    }
}
