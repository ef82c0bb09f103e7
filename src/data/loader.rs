use std::fs;
use std::path::Path;

use crate::bank::QuestionBank;
use crate::error::LoadError;
use crate::models::Question;

/// Load and validate a question bank from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = parse_questions(&json_content)?;
    tracing::info!(path = %path.display(), count = bank.len(), "loaded questions");
    Ok(bank)
}

/// Parse and validate a JSON array of questions.
pub fn parse_questions(json: &str) -> Result<QuestionBank, LoadError> {
    let questions: Vec<Question> = serde_json::from_str(json)?;
    Ok(QuestionBank::new(questions)?)
}
