use tracing::warn;

use crate::bank::QuestionBank;
use crate::error::SessionError;
use crate::models::{QuestionKind, Response};
use crate::session::{AdvanceCause, QuizSession, SessionChannels, SessionConfig, SessionEvent};

/// Terminal front end state around a [`QuizSession`].
///
/// Key presses become session commands; session signals update the bits of
/// UI state the session does not own (cursor, scroll, banners).
pub struct App {
    session: QuizSession,
    channels: SessionChannels,
    cursor: usize,
    review_scroll: usize,
    last_cause: Option<AdvanceCause>,
    status: Option<String>,
}

impl App {
    pub fn new(bank: QuestionBank, config: SessionConfig) -> Self {
        let (session, channels) = QuizSession::new(bank, config);

        Self {
            session,
            channels,
            cursor: 0,
            review_scroll: 0,
            last_cause: None,
            status: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Highlighted option on the current question.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn review_scroll(&self) -> usize {
        self.review_scroll
    }

    /// Why the question showing feedback was scored.
    pub fn last_cause(&self) -> Option<AdvanceCause> {
        self.last_cause
    }

    /// Diagnostic from the last rejected command.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether key presses should go into a text answer.
    pub fn is_text_entry(&self) -> bool {
        self.session
            .current_question()
            .is_some_and(|question| question.kind() == QuestionKind::FillInBlank)
    }

    /// Feed due timer triggers to the session, then apply whatever it
    /// signalled. Called once per frame.
    pub fn pump(&mut self) {
        while let Ok(trigger) = self.channels.triggers.try_recv() {
            self.session.handle_trigger(trigger);
        }
        while let Ok(event) = self.channels.events.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::PhaseChanged(_) => {
                self.review_scroll = 0;
                self.last_cause = None;
            }
            SessionEvent::QuestionChanged { .. } => {
                self.cursor = 0;
                self.last_cause = None;
                self.status = None;
            }
            SessionEvent::AnswerFeedback { cause, .. } => {
                self.last_cause = Some(cause);
            }
            SessionEvent::Tick { .. } => {}
        }
    }

    pub fn start_quiz(&mut self) {
        let result = self.session.start();
        self.report(result);
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Select (single-choice) or toggle (multi-select) the highlighted option.
    pub fn choose_highlighted(&mut self) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let kind = question.kind();
        let Some(option) = question.options().get(self.cursor).cloned() else {
            return;
        };

        let result = match kind {
            QuestionKind::SingleChoice => self.session.record_single_choice(&option),
            QuestionKind::MultiSelect => {
                let included = !self
                    .session
                    .current_response()
                    .is_some_and(|response| response.is_selected(&option));
                self.session.toggle_multi_select(&option, included)
            }
            QuestionKind::FillInBlank => return,
        };
        self.report(result);
    }

    pub fn type_char(&mut self, c: char) {
        let mut text = self.typed_text();
        text.push(c);
        let result = self.session.set_fill_in_text(&text);
        self.report(result);
    }

    pub fn backspace(&mut self) {
        let mut text = self.typed_text();
        text.pop();
        let result = self.session.set_fill_in_text(&text);
        self.report(result);
    }

    /// The "next" or "submit" action; both advance the same way.
    pub fn submit(&mut self) {
        let result = self.session.advance().map(|_| ());
        self.report(result);
    }

    pub fn open_review(&mut self) {
        let result = self.session.enter_review();
        self.report(result);
    }

    pub fn back_to_results(&mut self) {
        let result = self.session.return_to_results();
        self.report(result);
    }

    pub fn play_again(&mut self) {
        self.session.reset();
        self.status = None;
    }

    pub fn scroll_review_down(&mut self) {
        let max_scroll = self.session.total().saturating_sub(1);
        self.review_scroll = (self.review_scroll + 1).min(max_scroll);
    }

    pub fn scroll_review_up(&mut self) {
        self.review_scroll = self.review_scroll.saturating_sub(1);
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |question| question.options().len())
    }

    fn typed_text(&self) -> String {
        match self.session.current_response() {
            Some(Response::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    fn report(&mut self, result: Result<(), SessionError>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                warn!(%err, "command rejected");
                self.status = Some(err.to_string());
            }
        }
    }
}
