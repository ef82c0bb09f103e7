use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::bank::{self, QuestionBank};
use crate::clock::{
    ClockTick, DEFAULT_FEEDBACK_DELAY, FeedbackDelay, QUESTION_TIME_LIMIT, SessionClock, Trigger,
};
use crate::error::SessionError;
use crate::models::{Question, QuestionKind, Response};
use crate::validator::is_correct;

use super::{AdvanceCause, Command, Phase, ReviewEntry, SessionEvent};

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seconds allowed per question.
    pub time_limit: u32,
    /// How long answer feedback shows before moving on.
    pub feedback_delay: Duration,
    /// Shuffle question order and options on every start.
    pub shuffle: bool,
    /// Seed for shuffling; fresh entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: QUESTION_TIME_LIMIT,
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            shuffle: true,
            seed: None,
        }
    }
}

/// A question paired with the user's response to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionItem {
    pub question: Question,
    pub response: Response,
}

impl SessionItem {
    fn new(question: Question) -> Self {
        let response = Response::unanswered(&question);
        Self { question, response }
    }

    pub fn is_correct(&self) -> bool {
        is_correct(&self.question, &self.response)
    }
}

/// Receiving ends handed out when a session is created.
///
/// `triggers` must be drained and fed back through
/// [`QuizSession::handle_trigger`]; `events` is for the presentation layer.
pub struct SessionChannels {
    pub triggers: mpsc::UnboundedReceiver<Trigger>,
    pub events: mpsc::UnboundedReceiver<SessionEvent>,
}

/// The quiz session aggregate.
pub struct QuizSession {
    bank: QuestionBank,
    config: SessionConfig,
    items: Vec<SessionItem>,
    current_index: usize,
    score: usize,
    phase: Phase,
    /// Outcome of the current question while its feedback is showing.
    feedback: Option<bool>,
    clock: SessionClock,
    delay: FeedbackDelay,
    rng: StdRng,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl QuizSession {
    /// Create a session on the landing screen.
    pub fn new(bank: QuestionBank, config: SessionConfig) -> (Self, SessionChannels) {
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let session = Self {
            items: fresh_items(&bank),
            bank,
            clock: SessionClock::new(config.time_limit, trigger_tx.clone()),
            delay: FeedbackDelay::new(trigger_tx),
            config,
            current_index: 0,
            score: 0,
            phase: Phase::Landing,
            feedback: None,
            rng,
            events: event_tx,
        };

        let channels = SessionChannels {
            triggers: trigger_rx,
            events: event_rx,
        };

        (session, channels)
    }

    /// Shuffle questions and options, clear all responses and start the
    /// clock for the first question.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Command::Start, Phase::Landing)?;

        let mut questions = self.bank.questions().to_vec();
        if self.config.shuffle {
            bank::shuffle_questions(&mut questions, &mut self.rng);
            for question in &mut questions {
                bank::shuffle_options(question, &mut self.rng);
            }
        }

        self.items = questions.into_iter().map(SessionItem::new).collect();
        self.current_index = 0;
        self.score = 0;
        self.feedback = None;

        info!(total = self.items.len(), "quiz started");
        self.set_phase(Phase::InProgress);
        self.begin_question();
        Ok(())
    }

    /// Select `option` on the current single-choice question, replacing any
    /// previous selection.
    pub fn record_single_choice(&mut self, option: &str) -> Result<(), SessionError> {
        let command = Command::RecordSingleChoice;
        let item = self.answerable_item(command)?;
        expect_kind(item, command, QuestionKind::SingleChoice)?;
        expect_option(item, option)?;

        item.response = Response::Single(Some(option.to_string()));
        debug!(index = self.current_index, option, "single choice recorded");
        Ok(())
    }

    /// Include or exclude `option` on the current multi-select question.
    /// Repeating the current state is a no-op.
    pub fn toggle_multi_select(&mut self, option: &str, included: bool) -> Result<(), SessionError> {
        let command = Command::ToggleMultiSelect;
        let item = self.answerable_item(command)?;
        expect_kind(item, command, QuestionKind::MultiSelect)?;
        expect_option(item, option)?;

        match &mut item.response {
            Response::Multi(selected) => {
                if included {
                    selected.insert(option.to_string());
                } else {
                    selected.remove(option);
                }
            }
            other => {
                return Err(SessionError::TypeMismatch {
                    command,
                    found: other.kind(),
                });
            }
        }

        debug!(index = self.current_index, option, included, "multi-select toggled");
        Ok(())
    }

    /// Replace the text answer of the current fill-in-the-blank question.
    pub fn set_fill_in_text(&mut self, text: &str) -> Result<(), SessionError> {
        let command = Command::SetFillInText;
        let item = self.answerable_item(command)?;
        expect_kind(item, command, QuestionKind::FillInBlank)?;

        item.response = Response::Text(text.to_string());
        Ok(())
    }

    /// Score the current question and start the feedback delay. Once the
    /// delay ends the session moves to the next question or to results.
    ///
    /// Returns whether the answer was correct.
    pub fn advance(&mut self) -> Result<bool, SessionError> {
        self.score_current(AdvanceCause::Manual)
    }

    pub fn enter_review(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Command::EnterReview, Phase::Results)?;
        self.set_phase(Phase::Review);
        Ok(())
    }

    pub fn return_to_results(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Command::ReturnToResults, Phase::Review)?;
        self.set_phase(Phase::Results);
        Ok(())
    }

    /// Drop all progress and go back to the landing screen. Pending timers
    /// are cancelled so nothing from the old run can fire.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.delay.cancel();
        self.items = fresh_items(&self.bank);
        self.current_index = 0;
        self.score = 0;
        self.feedback = None;

        info!("session reset");
        self.set_phase(Phase::Landing);
    }

    /// Apply a timer trigger. Triggers from cancelled timers are ignored.
    pub fn handle_trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Tick { epoch } => match self.clock.on_tick(epoch) {
                ClockTick::Stale => debug!(epoch, "stale tick ignored"),
                ClockTick::Running(remaining) => self.emit(SessionEvent::Tick { remaining }),
                ClockTick::Expired => {
                    self.emit(SessionEvent::Tick { remaining: 0 });
                    info!(index = self.current_index, "time expired");
                    if let Err(err) = self.score_current(AdvanceCause::Expired) {
                        warn!(%err, "could not advance after time expired");
                    }
                }
            },
            Trigger::FeedbackElapsed { epoch } => {
                if self.delay.on_elapsed(epoch) {
                    self.next_question();
                } else {
                    debug!(epoch, "stale feedback delay ignored");
                }
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Score as a rounded percentage of the question count.
    pub fn percentage(&self) -> u32 {
        if self.items.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.items.len() as f64) * 100.0).round() as u32
    }

    /// The current question and response, while a quiz is in progress.
    pub fn current_item(&self) -> Option<&SessionItem> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.items.get(self.current_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_item().map(|item| &item.question)
    }

    pub fn current_response(&self) -> Option<&Response> {
        self.current_item().map(|item| &item.response)
    }

    /// On the last question the adapter offers "submit" instead of "next".
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.items.len()
    }

    pub fn remaining_time(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn time_limit(&self) -> u32 {
        self.clock.limit()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Outcome of the current question while its feedback is showing.
    pub fn feedback(&self) -> Option<bool> {
        self.feedback
    }

    pub fn items(&self) -> &[SessionItem] {
        &self.items
    }

    /// Every question with its response and correctness.
    pub fn review(&self) -> Vec<ReviewEntry<'_>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| ReviewEntry {
                index,
                question: &item.question,
                response: &item.response,
                correct: item.is_correct(),
            })
            .collect()
    }

    fn score_current(&mut self, cause: AdvanceCause) -> Result<bool, SessionError> {
        let correct = self.answerable_item(Command::Advance)?.is_correct();

        self.clock.stop();
        if correct {
            self.score += 1;
        }
        self.feedback = Some(correct);
        self.delay.schedule(self.config.feedback_delay);

        debug!(index = self.current_index, correct, ?cause, "question scored");
        self.emit(SessionEvent::AnswerFeedback {
            index: self.current_index,
            correct,
            cause,
        });
        Ok(correct)
    }

    fn next_question(&mut self) {
        self.feedback = None;

        if self.current_index + 1 < self.items.len() {
            self.current_index += 1;
            self.begin_question();
        } else {
            info!(score = self.score, total = self.items.len(), "quiz finished");
            self.set_phase(Phase::Results);
        }
    }

    fn begin_question(&mut self) {
        self.clock.start();
        self.emit(SessionEvent::QuestionChanged {
            index: self.current_index,
            total: self.items.len(),
        });
        self.emit(SessionEvent::Tick {
            remaining: self.clock.remaining(),
        });
    }

    fn set_phase(&mut self, phase: Phase) {
        if phase != Phase::InProgress {
            self.clock.stop();
            self.delay.cancel();
        }
        self.phase = phase;
        self.emit(SessionEvent::PhaseChanged(phase));
    }

    fn expect_phase(&self, command: Command, phase: Phase) -> Result<(), SessionError> {
        if self.phase != phase {
            return Err(SessionError::InvalidStateTransition {
                command,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn answerable_item(&mut self, command: Command) -> Result<&mut SessionItem, SessionError> {
        self.expect_phase(command, Phase::InProgress)?;
        if self.feedback.is_some() {
            return Err(SessionError::FeedbackPending { command });
        }

        let index = self.current_index;
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(SessionError::OutOfRange { index, len })
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

fn fresh_items(bank: &QuestionBank) -> Vec<SessionItem> {
    bank.questions().iter().cloned().map(SessionItem::new).collect()
}

fn expect_kind(item: &SessionItem, command: Command, kind: QuestionKind) -> Result<(), SessionError> {
    let found = item.question.kind();
    if found != kind {
        return Err(SessionError::TypeMismatch { command, found });
    }
    Ok(())
}

fn expect_option(item: &SessionItem, option: &str) -> Result<(), SessionError> {
    if !item.question.has_option(option) {
        return Err(SessionError::UnknownOption {
            option: option.to_string(),
        });
    }
    Ok(())
}
