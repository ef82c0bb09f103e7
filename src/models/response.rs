use std::collections::BTreeSet;

use super::question::{Question, QuestionKind};

const NO_ANSWER: &str = "No answer";

/// The user's answer slot for one question. Its shape always matches the
/// question it was created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// At most one selected option.
    Single(Option<String>),
    /// Selected options, possibly empty.
    Multi(BTreeSet<String>),
    /// Free text exactly as typed.
    Text(String),
}

impl Response {
    /// The "unanswered" value for the question's variant.
    pub fn unanswered(question: &Question) -> Self {
        match question.kind() {
            QuestionKind::SingleChoice => Response::Single(None),
            QuestionKind::MultiSelect => Response::Multi(BTreeSet::new()),
            QuestionKind::FillInBlank => Response::Text(String::new()),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Response::Single(_) => QuestionKind::SingleChoice,
            Response::Multi(_) => QuestionKind::MultiSelect,
            Response::Text(_) => QuestionKind::FillInBlank,
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            Response::Single(selected) => selected.is_some(),
            Response::Multi(selected) => !selected.is_empty(),
            Response::Text(text) => !text.trim().is_empty(),
        }
    }

    /// Whether `option` is currently chosen (always false for text answers).
    pub fn is_selected(&self, option: &str) -> bool {
        match self {
            Response::Single(selected) => selected.as_deref() == Some(option),
            Response::Multi(selected) => selected.contains(option),
            Response::Text(_) => false,
        }
    }

    /// The submitted answer formatted for review, in the question's option order.
    pub fn summary(&self, question: &Question) -> String {
        match self {
            Response::Single(Some(selected)) => selected.clone(),
            Response::Multi(selected) if !selected.is_empty() => question
                .options()
                .iter()
                .filter(|option| selected.contains(*option))
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            // Only an empty text falls back; whitespace is shown as typed.
            Response::Text(text) if !text.is_empty() => text.clone(),
            _ => NO_ANSWER.to_string(),
        }
    }
}
