//! parser for the plain-text quiz format

use std::path::Path;
use tracing::debug;

use crate::model::{LoadingError, Quiz, QuizOptions};
use crate::parsing::parser::ParsingError;

pub mod parser;

/// Read a quiz file and return an owned String. Pasted text, file
/// content, and AI-returned text all arrive at the parser through the
/// same raw-text contract, so this is the only filesystem touchpoint.
pub fn load(filename: &Path) -> Result<String, LoadingError> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename: filename.to_path_buf(),
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
            }
        }
    }
}

/// Parse raw text into a Quiz document, or report why no document could
/// be produced.
pub fn parse(
    raw: &str,
    title: Option<&str>,
    options: QuizOptions,
    prior: Option<&Quiz>,
    rng: &mut impl rand::Rng,
) -> Result<Quiz, ParsingError> {
    let result = parser::parse_quiz(raw, title, options, prior, rng);

    match &result {
        Ok(quiz) => {
            let count = quiz
                .questions
                .len();
            debug!(
                "Found {} question{}",
                count,
                if count == 1 { "" } else { "s" }
            );
        }
        Err(error) => {
            debug!(%error);
        }
    }

    result
}
