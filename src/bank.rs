//! Question bank and shuffling.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::BankError;
use crate::models::Question;

/// A validated, non-empty list of question definitions.
///
/// The bank keeps questions in their authored order; sessions copy and
/// shuffle them on every start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, validating every question.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        for (index, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|source| BankError::InvalidQuestion { index, source })?;
        }

        Ok(Self { questions })
    }

    /// The five questions bundled with the binary.
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                Question::single_choice(
                    "What is the capital of France?",
                    ["Berlin", "Madrid", "Paris", "Rome"],
                    "Paris",
                ),
                Question::multi_select(
                    "Which of these are programming languages?",
                    ["Python", "HTML", "CSS", "JavaScript", "SQL"],
                    ["Python", "JavaScript"],
                ),
                Question::fill_in_blank(
                    "The largest planet in our solar system is ____.",
                    "Jupiter",
                ),
                Question::single_choice("What is 2 + 2?", ["3", "4", "5", "6"], "4"),
                Question::multi_select(
                    "Which of these are fruits?",
                    ["Carrot", "Apple", "Banana", "Potato", "Orange"],
                    ["Apple", "Banana", "Orange"],
                ),
            ],
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Uniform Fisher–Yates permutation of the question order.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &mut [Question], rng: &mut R) {
    questions.shuffle(rng);
}

/// Shuffle a question's options in place. Correct answers are stored as
/// option text, so they follow their option wherever it lands.
pub fn shuffle_options<R: Rng + ?Sized>(question: &mut Question, rng: &mut R) {
    if let Some(options) = question.options_mut() {
        options.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn sorted(mut items: Vec<String>) -> Vec<String> {
        items.sort();
        items
    }

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 5);
        assert_eq!(QuestionBank::new(bank.questions().to_vec()), Ok(bank));
    }

    #[test]
    fn test_new_rejects_empty_and_invalid() {
        assert_eq!(QuestionBank::new(Vec::new()), Err(BankError::Empty));

        let questions = vec![
            Question::fill_in_blank("ok", "fine"),
            Question::single_choice("bad", ["a", "b"], "c"),
        ];
        assert!(matches!(
            QuestionBank::new(questions),
            Err(BankError::InvalidQuestion { index: 1, .. })
        ));
    }

    fn numbered(count: usize) -> Question {
        let options: Vec<String> = (0..count).map(|n| n.to_string()).collect();
        Question::single_choice("Pick one", options, "0")
    }

    #[test]
    fn test_shuffle_options_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = numbered(20);

        for _ in 0..50 {
            let mut question = original.clone();
            shuffle_options(&mut question, &mut rng);
            assert_eq!(
                sorted(question.options().to_vec()),
                sorted(original.options().to_vec())
            );
        }
    }

    #[test]
    fn test_shuffle_options_reaches_every_position() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut first_counts = BTreeMap::new();

        for _ in 0..600 {
            let mut question = numbered(3);
            shuffle_options(&mut question, &mut rng);
            *first_counts
                .entry(question.options()[0].clone())
                .or_insert(0) += 1;
        }

        assert_eq!(first_counts.len(), 3);
        assert!(first_counts.values().all(|count| *count > 100));
    }

    #[test]
    fn test_shuffle_handles_short_lists() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<Question> = Vec::new();
        shuffle_questions(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = numbered(1);
        shuffle_options(&mut one, &mut rng);
        assert_eq!(one, numbered(1));
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let bank = QuestionBank::builtin();
        let mut first = bank.questions().to_vec();
        let mut second = bank.questions().to_vec();
        shuffle_questions(&mut first, &mut StdRng::seed_from_u64(21));
        shuffle_questions(&mut second, &mut StdRng::seed_from_u64(21));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_options_keeps_correct_answers() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = Question::multi_select(
            "Which of these are fruits?",
            ["Carrot", "Apple", "Banana", "Potato", "Orange"],
            ["Apple", "Banana", "Orange"],
        );

        for _ in 0..20 {
            let mut question = original.clone();
            shuffle_options(&mut question, &mut rng);

            assert_eq!(
                sorted(question.options().to_vec()),
                sorted(original.options().to_vec())
            );
            for option in original.options() {
                assert_eq!(
                    question.is_correct_option(option),
                    original.is_correct_option(option)
                );
            }
            assert!(question.validate().is_ok());
        }
    }

    #[test]
    fn test_shuffle_options_ignores_fill_in() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut question = Question::fill_in_blank("Largest planet?", "Jupiter");
        shuffle_options(&mut question, &mut rng);
        assert_eq!(question, Question::fill_in_blank("Largest planet?", "Jupiter"));
    }

    #[test]
    fn test_shuffle_questions_keeps_every_question() {
        let mut rng = StdRng::seed_from_u64(9);
        let bank = QuestionBank::builtin();
        let mut questions = bank.questions().to_vec();
        shuffle_questions(&mut questions, &mut rng);

        assert_eq!(questions.len(), bank.len());
        for question in bank.questions() {
            assert!(questions.contains(question));
        }
    }
}
