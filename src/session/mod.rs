//! Quiz session state machine.
//!
//! A [`QuizSession`] owns the shuffled questions, the user's responses, the
//! score and the question clock. All mutation goes through its command
//! methods; the presentation layer learns about changes through
//! [`SessionEvent`]s and reads everything else through accessors.

mod events;
mod review;
mod state;

use std::fmt;

pub use events::{AdvanceCause, SessionEvent};
pub use review::ReviewEntry;
pub use state::{QuizSession, SessionChannels, SessionConfig, SessionItem};

/// Coarse-grained state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to start.
    Landing,
    /// Answering questions.
    InProgress,
    /// Final score is showing.
    Results,
    /// Walking through submitted and correct answers.
    Review,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Landing => "on the landing screen",
            Phase::InProgress => "in progress",
            Phase::Results => "showing results",
            Phase::Review => "in review",
        };
        f.write_str(name)
    }
}

/// Commands accepted by a session, named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    RecordSingleChoice,
    ToggleMultiSelect,
    SetFillInText,
    Advance,
    EnterReview,
    ReturnToResults,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Start => "start the quiz",
            Command::RecordSingleChoice => "select an option",
            Command::ToggleMultiSelect => "toggle an option",
            Command::SetFillInText => "enter text",
            Command::Advance => "advance",
            Command::EnterReview => "open the review",
            Command::ReturnToResults => "return to results",
        };
        f.write_str(name)
    }
}
