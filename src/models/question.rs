use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// A quiz question, tagged by its answer type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Question {
    SingleChoice {
        #[serde(alias = "question")]
        prompt: String,
        options: Vec<String>,
        #[serde(rename = "answer")]
        correct_option: String,
    },
    MultiSelect {
        #[serde(alias = "question")]
        prompt: String,
        options: Vec<String>,
        #[serde(rename = "answer")]
        correct_options: BTreeSet<String>,
    },
    #[serde(rename = "fill-in-the-blank")]
    FillInBlank {
        #[serde(alias = "question")]
        prompt: String,
        #[serde(rename = "answer")]
        correct_text: String,
    },
}

/// The variant of a question, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    SingleChoice,
    MultiSelect,
    FillInBlank,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::SingleChoice => "single-choice",
            QuestionKind::MultiSelect => "multi-select",
            QuestionKind::FillInBlank => "fill-in-the-blank",
        };
        f.write_str(name)
    }
}

impl Question {
    pub fn single_choice<S: Into<String>>(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        correct_option: impl Into<String>,
    ) -> Self {
        Self::SingleChoice {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_option: correct_option.into(),
        }
    }

    pub fn multi_select<S: Into<String>, C: Into<String>>(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        correct_options: impl IntoIterator<Item = C>,
    ) -> Self {
        Self::MultiSelect {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_options: correct_options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fill_in_blank(prompt: impl Into<String>, correct_text: impl Into<String>) -> Self {
        Self::FillInBlank {
            prompt: prompt.into(),
            correct_text: correct_text.into(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::SingleChoice { .. } => QuestionKind::SingleChoice,
            Question::MultiSelect { .. } => QuestionKind::MultiSelect,
            Question::FillInBlank { .. } => QuestionKind::FillInBlank,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Question::SingleChoice { prompt, .. }
            | Question::MultiSelect { prompt, .. }
            | Question::FillInBlank { prompt, .. } => prompt,
        }
    }

    /// Options in their current (possibly shuffled) order. Empty for fill-in questions.
    pub fn options(&self) -> &[String] {
        match self {
            Question::SingleChoice { options, .. } | Question::MultiSelect { options, .. } => {
                options
            }
            Question::FillInBlank { .. } => &[],
        }
    }

    pub(crate) fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Question::SingleChoice { options, .. } | Question::MultiSelect { options, .. } => {
                Some(options)
            }
            Question::FillInBlank { .. } => None,
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options().iter().any(|candidate| candidate == option)
    }

    /// Whether the given option text is (one of) the correct answer(s).
    pub fn is_correct_option(&self, option: &str) -> bool {
        match self {
            Question::SingleChoice { correct_option, .. } => correct_option == option,
            Question::MultiSelect {
                correct_options, ..
            } => correct_options.contains(option),
            Question::FillInBlank { .. } => false,
        }
    }

    /// The expected answer formatted for display.
    pub fn correct_answer_text(&self) -> String {
        match self {
            Question::SingleChoice { correct_option, .. } => correct_option.clone(),
            Question::MultiSelect {
                options,
                correct_options,
                ..
            } => options
                .iter()
                .filter(|option| correct_options.contains(*option))
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            Question::FillInBlank { correct_text, .. } => correct_text.clone(),
        }
    }

    /// Checks the definition invariants: unique options and correct answers
    /// drawn from them.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.prompt().trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        match self {
            Question::SingleChoice {
                options,
                correct_option,
                ..
            } => {
                check_options(options)?;
                if !options.contains(correct_option) {
                    return Err(QuestionError::AnswerNotInOptions(correct_option.clone()));
                }
            }
            Question::MultiSelect {
                options,
                correct_options,
                ..
            } => {
                check_options(options)?;
                if correct_options.is_empty() {
                    return Err(QuestionError::NoCorrectOptions);
                }
                if let Some(missing) = correct_options.iter().find(|c| !options.contains(*c)) {
                    return Err(QuestionError::AnswerNotInOptions(missing.clone()));
                }
            }
            Question::FillInBlank { correct_text, .. } => {
                if correct_text.trim().is_empty() {
                    return Err(QuestionError::BlankAnswer);
                }
            }
        }

        Ok(())
    }
}

fn check_options(options: &[String]) -> Result<(), QuestionError> {
    if options.is_empty() {
        return Err(QuestionError::NoOptions);
    }

    let mut seen = HashSet::with_capacity(options.len());
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(QuestionError::DuplicateOption(option.clone()));
        }
    }

    Ok(())
}
