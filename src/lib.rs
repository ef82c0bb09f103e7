//! # quiz-runner
//!
//! A terminal quiz runner: timed single-choice, multi-select and
//! fill-in-the-blank questions, scoring, and a review of every answer.
//!
//! The core is [`QuizSession`], a state machine driven by commands and
//! timer triggers. The terminal front end in this crate is one consumer of
//! it; anything that can forward triggers and read [`SessionEvent`]s can
//! drive a session.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_runner::{Quiz, QuizError, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("questions.json", SessionConfig::default())?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod bank;
mod clock;
mod data;
mod error;
mod models;
mod session;
pub mod terminal;
mod ui;
mod validator;

use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use bank::{QuestionBank, shuffle_options, shuffle_questions};
pub use clock::{
    ClockTick, DEFAULT_FEEDBACK_DELAY, DEFAULT_FEEDBACK_DELAY_MS, FeedbackDelay,
    QUESTION_TIME_LIMIT, SessionClock, Trigger, format_time,
};
pub use data::{load_questions_from_json, parse_questions};
pub use error::{BankError, LoadError, QuestionError, QuizError, SessionError};
pub use models::{Question, QuestionKind, Response};
pub use session::{
    AdvanceCause, Command, Phase, QuizSession, ReviewEntry, SessionChannels, SessionConfig,
    SessionEvent, SessionItem,
};
pub use validator::is_correct;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a question bank.
    pub fn new(bank: QuestionBank, config: SessionConfig) -> Self {
        Self {
            app: App::new(bank, config),
        }
    }

    /// A quiz over the bundled questions.
    pub fn builtin(config: SessionConfig) -> Self {
        Self::new(QuestionBank::builtin(), config)
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file containing questions.
    /// * `config` - Timing and shuffling settings.
    pub fn from_json<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self, QuizError> {
        let bank = load_questions_from_json(path)?;
        Ok(Self::new(bank, config))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits. Must be called from within a tokio runtime.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    loop {
        app.pump();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key.code) {
                    break;
                }
            }
        } else {
            tokio::task::yield_now().await;
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.session().phase() {
        Phase::Landing => handle_landing_input(app, key),
        Phase::InProgress if app.is_text_entry() => handle_text_input(app, key),
        Phase::InProgress => handle_choice_input(app, key),
        Phase::Results => handle_results_input(app, key),
        Phase::Review => handle_review_input(app, key),
    }
}

fn handle_landing_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_choice_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Char(' ') => {
            app.choose_highlighted();
            false
        }
        KeyCode::Enter => {
            app.submit();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_text_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            app.type_char(c);
            false
        }
        KeyCode::Backspace => {
            app.backspace();
            false
        }
        KeyCode::Enter => {
            app.submit();
            false
        }
        KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_results_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('v') | KeyCode::Char('V') => {
            app.open_review();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.play_again();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_review_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_review_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_review_up();
            false
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => {
            app.back_to_results();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}
