//! JSON import and export. Quiz documents round-trip losslessly;
//! importing regenerates any ids a legacy document is missing rather
//! than rejecting it.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::flashcards::Flashcard;
use crate::mistakes::MistakeEntry;
use crate::model::Quiz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    pub details: String,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid import payload: {}", self.details)
    }
}

/// Accept a payload that is a bare array of quizzes, an export envelope
/// `{ "quizzes": [...] }`, or a single quiz object. Missing ids at any
/// level are minted fresh. A malformed payload yields an error and
/// nothing else; the caller's collection is untouched.
pub fn import_quizzes(payload: &str, rng: &mut impl Rng) -> Result<Vec<Quiz>, ImportError> {
    let value: Value = serde_json::from_str(payload).map_err(|error| ImportError {
        details: error.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("quizzes") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ImportError {
                    details: format!("'quizzes' should be an array, not {}", kind_of(&other)),
                })
            }
            None => vec![Value::Object(object)],
        },
        other => {
            return Err(ImportError {
                details: format!("expected a quiz or an array of quizzes, got {}", kind_of(&other)),
            })
        }
    };

    let mut quizzes = Vec::with_capacity(items.len());
    for item in items {
        let mut quiz: Quiz = serde_json::from_value(item).map_err(|error| ImportError {
            details: error.to_string(),
        })?;
        quiz.ensure_ids(rng);
        quizzes.push(quiz);
    }
    Ok(quizzes)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizzesEnvelope<'a> {
    exported_at: String,
    quizzes: &'a [Quiz],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MistakesEnvelope<'a> {
    exported_at: String,
    mistakes: &'a [MistakeEntry],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlashcardsEnvelope<'a> {
    exported_at: String,
    flashcards: &'a [Flashcard],
}

/// A single quiz exports as a bare document object.
pub fn export_quiz(quiz: &Quiz) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(quiz)
}

/// The whole collection exports wrapped in a timestamped envelope.
pub fn export_all(quizzes: &[Quiz]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&QuizzesEnvelope {
        exported_at: Utc::now().to_rfc3339(),
        quizzes,
    })
}

pub fn export_mistakes(mistakes: &[MistakeEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&MistakesEnvelope {
        exported_at: Utc::now().to_rfc3339(),
        mistakes,
    })
}

pub fn export_flashcards(flashcards: &[Flashcard]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FlashcardsEnvelope {
        exported_at: Utc::now().to_rfc3339(),
        flashcards,
    })
}
