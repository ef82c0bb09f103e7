//! End-to-end session runs through the public API.

use std::time::Duration;

use quiz_runner::{
    AdvanceCause, Phase, Question, QuestionBank, QuizSession, SessionChannels, SessionConfig,
    SessionError, SessionEvent, parse_questions,
};

const QUESTIONS: &str = r#"[
    {"type": "single-choice", "question": "What is 2 + 2?", "options": ["3", "4", "5", "6"], "answer": "4"},
    {"type": "multi-select", "question": "Which of these are fruits?",
     "options": ["Carrot", "Apple", "Banana", "Potato", "Orange"], "answer": ["Apple", "Banana", "Orange"]},
    {"type": "fill-in-the-blank", "question": "The largest planet in our solar system is ____.", "answer": "Jupiter"}
]"#;

fn seeded_session(bank: QuestionBank) -> (QuizSession, SessionChannels) {
    let config = SessionConfig {
        seed: Some(2024),
        ..SessionConfig::default()
    };
    QuizSession::new(bank, config)
}

/// Process triggers in arrival order until `done` holds.
async fn run_until(
    session: &mut QuizSession,
    channels: &mut SessionChannels,
    done: impl Fn(&QuizSession) -> bool,
) {
    while !done(session) {
        let trigger = channels.triggers.recv().await.expect("trigger channel closed");
        session.handle_trigger(trigger);
    }
}

fn answer_correctly(session: &mut QuizSession) {
    let question = session.current_question().cloned().expect("no current question");
    match question {
        Question::SingleChoice { correct_option, .. } => {
            session.record_single_choice(&correct_option).unwrap();
        }
        Question::MultiSelect {
            correct_options, ..
        } => {
            for option in &correct_options {
                session.toggle_multi_select(option, true).unwrap();
            }
        }
        Question::FillInBlank { correct_text, .. } => {
            session
                .set_fill_in_text(&format!("  {}  ", correct_text.to_uppercase()))
                .unwrap();
        }
    }
}

#[tokio::test(start_paused = true)]
async fn answering_everything_correctly_scores_full_marks() {
    let (mut session, mut channels) = seeded_session(parse_questions(QUESTIONS).unwrap());
    session.start().unwrap();

    while session.phase() == Phase::InProgress {
        let index = session.current_index();
        answer_correctly(&mut session);
        assert_eq!(session.advance(), Ok(true));
        run_until(&mut session, &mut channels, |s| {
            s.phase() != Phase::InProgress || s.current_index() != index
        })
        .await;
    }

    assert_eq!(session.phase(), Phase::Results);
    assert_eq!(session.score(), 3);
    assert_eq!(session.percentage(), 100);
    assert!(session.review().iter().all(|entry| entry.correct));
}

#[tokio::test(start_paused = true)]
async fn idle_quiz_times_out_question_by_question() {
    let (mut session, mut channels) = seeded_session(parse_questions(QUESTIONS).unwrap());
    let started = tokio::time::Instant::now();
    session.start().unwrap();

    run_until(&mut session, &mut channels, |s| s.phase() == Phase::Results).await;

    // Three full clocks plus three feedback pauses.
    let expected = Duration::from_secs(90) + Duration::from_millis(3 * 1700);
    let elapsed = started.elapsed();
    assert!(elapsed >= expected && elapsed < expected + Duration::from_secs(1));

    assert_eq!(session.score(), 0);
    assert_eq!(session.percentage(), 0);

    let mut expired = 0;
    let mut ticks_per_question = vec![0u32; 3];
    let mut current = 0;
    while let Ok(event) = channels.events.try_recv() {
        match event {
            SessionEvent::QuestionChanged { index, .. } => current = index,
            SessionEvent::Tick { remaining } if remaining < 30 => ticks_per_question[current] += 1,
            SessionEvent::AnswerFeedback {
                correct: false,
                cause: AdvanceCause::Expired,
                ..
            } => expired += 1,
            _ => {}
        }
    }
    assert_eq!(expired, 3);
    assert_eq!(ticks_per_question, vec![30, 30, 30]);
}

#[tokio::test(start_paused = true)]
async fn review_shows_submitted_and_correct_answers() {
    let bank = QuestionBank::new(vec![
        Question::multi_select(
            "Which of these are fruits?",
            ["Carrot", "Apple", "Banana", "Potato", "Orange"],
            ["Apple", "Banana", "Orange"],
        ),
        Question::fill_in_blank("The largest planet in our solar system is ____.", "Jupiter"),
    ])
    .unwrap();
    let config = SessionConfig {
        shuffle: false,
        ..SessionConfig::default()
    };
    let (mut session, mut channels) = QuizSession::new(bank, config);
    session.start().unwrap();

    session.toggle_multi_select("Banana", true).unwrap();
    session.toggle_multi_select("Apple", true).unwrap();
    session.advance().unwrap();
    run_until(&mut session, &mut channels, |s| s.current_index() == 1).await;

    session.set_fill_in_text(" jupiter  ").unwrap();
    session.advance().unwrap();
    run_until(&mut session, &mut channels, |s| s.phase() == Phase::Results).await;

    session.enter_review().unwrap();
    let review = session.review();
    assert!(!review[0].correct);
    assert_eq!(review[0].submitted(), "Apple, Banana");
    assert_eq!(review[0].expected(), "Apple, Banana, Orange");
    assert!(review[1].correct);
    assert_eq!(review[1].submitted(), " jupiter  ");

    assert_eq!(
        session.set_fill_in_text("late"),
        Err(SessionError::InvalidStateTransition {
            command: quiz_runner::Command::SetFillInText,
            phase: Phase::Review,
        })
    );

    session.return_to_results().unwrap();
    assert_eq!(session.score(), 1);
    assert_eq!(session.percentage(), 50);
}

#[tokio::test(start_paused = true)]
async fn reset_mid_question_discards_the_run() {
    let (mut session, mut channels) = seeded_session(QuestionBank::builtin());
    session.start().unwrap();
    answer_correctly(&mut session);
    session.advance().unwrap();
    run_until(&mut session, &mut channels, |s| s.current_index() == 1).await;
    answer_correctly(&mut session);

    session.reset();
    tokio::time::sleep(Duration::from_secs(60)).await;
    while let Ok(trigger) = channels.triggers.try_recv() {
        session.handle_trigger(trigger);
    }
    assert_eq!(session.phase(), Phase::Landing);

    session.start().unwrap();
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.remaining_time(), 30);
    assert!(
        session
            .items()
            .iter()
            .all(|item| !item.response.is_answered())
    );
}
