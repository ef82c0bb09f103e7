//! Error types shared across the quiz runner.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::QuestionKind;
use crate::session::{Command, Phase};

/// A session command that was rejected without touching any state.
///
/// These are programming errors on the caller's side, never user-facing
/// failures: an unanswered question at timeout is scored, not reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {command} while the quiz is {phase}")]
    InvalidStateTransition { command: Command, phase: Phase },
    #[error("cannot {command} on a {found} question")]
    TypeMismatch { command: Command, found: QuestionKind },
    #[error("question {index} is out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },
    #[error("\"{option}\" is not an option of the current question")]
    UnknownOption { option: String },
    #[error("cannot {command} while answer feedback is showing")]
    FeedbackPending { command: Command },
}

/// A malformed question definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("question has no options")]
    NoOptions,
    #[error("option \"{0}\" appears more than once")]
    DuplicateOption(String),
    #[error("correct answer \"{0}\" is not one of the options")]
    AnswerNotInOptions(String),
    #[error("no correct options given")]
    NoCorrectOptions,
    #[error("expected answer is blank")]
    BlankAnswer,
}

/// Errors raised while assembling a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("the question bank must contain at least one question")]
    Empty,
    #[error("question {}: {source}", .index + 1)]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Errors raised while loading questions from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse questions: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Error type for running a quiz end to end.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
