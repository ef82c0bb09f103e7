//! Answer validation.

use crate::models::{Question, Response};

/// Whether `response` is a correct answer to `question`.
///
/// * single-choice: the selected option equals the correct one; no selection
///   is wrong.
/// * multi-select: same size as the correct set and every selected option is
///   in it. Both checks are needed: the size check alone accepts wrong picks,
///   the subset check alone accepts partial answers.
/// * fill-in-the-blank: the response with surrounding whitespace trimmed
///   matches case-insensitively. Internal whitespace must match exactly.
///
/// A response whose shape does not match the question is never correct.
pub fn is_correct(question: &Question, response: &Response) -> bool {
    match (question, response) {
        (Question::SingleChoice { correct_option, .. }, Response::Single(selected)) => {
            selected.as_deref() == Some(correct_option.as_str())
        }
        (
            Question::MultiSelect {
                correct_options, ..
            },
            Response::Multi(selected),
        ) => {
            selected.len() == correct_options.len()
                && selected.iter().all(|option| correct_options.contains(option))
        }
        (Question::FillInBlank { correct_text, .. }, Response::Text(text)) => {
            text.trim().to_lowercase() == correct_text.to_lowercase()
        }
        _ => false,
    }
}
