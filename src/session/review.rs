use crate::models::{Question, Response};

/// One row of the post-quiz review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewEntry<'a> {
    pub index: usize,
    pub question: &'a Question,
    pub response: &'a Response,
    pub correct: bool,
}

impl ReviewEntry<'_> {
    pub fn heading(&self) -> String {
        format!("Question {}: {}", self.index + 1, self.question.prompt())
    }

    pub fn submitted(&self) -> String {
        self.response.summary(self.question)
    }

    pub fn expected(&self) -> String {
        self.question.correct_answer_text()
    }
}
