use super::Phase;

/// What caused the current question to be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceCause {
    /// The user pressed next or submit.
    Manual,
    /// The question clock ran out.
    Expired,
}

/// Signals emitted by a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    PhaseChanged(Phase),
    /// A new question became current.
    QuestionChanged { index: usize, total: usize },
    /// Remaining time on the question clock changed.
    Tick { remaining: u32 },
    /// The current question was scored. Shown until the feedback delay ends.
    AnswerFeedback {
        index: usize,
        correct: bool,
        cause: AdvanceCause,
    },
}
