//! Types representing a quiz document: a named, ordered collection of
//! questions plus the options governing how a play-through behaves.

use rand::Rng;
use serde::{Deserialize, Serialize};

const UID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UID_LENGTH: usize = 8;

/// Mint an opaque identifier for a quiz, question, or choice. Eight
/// characters of base-36, matching the identifiers found in documents
/// exported by earlier versions of the builder.
pub fn uid(rng: &mut impl Rng) -> String {
    (0..UID_LENGTH)
        .map(|_| UID_ALPHABET[rng.gen_range(0..UID_ALPHABET.len())] as char)
        .collect()
}

/// Trimmed, case-folded form of a quiz name, used wherever two names are
/// compared for "same logical quiz" purposes.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
}

/// One candidate answer on a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub correct: bool,
}

/// One question: a stem, an optional explanation shown after answering,
/// and at least one choice. More than one correct choice makes the
/// question multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub explanation: String,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn is_multi_select(&self) -> bool {
        self.choices
            .iter()
            .filter(|choice| choice.correct)
            .count()
            > 1
    }

    /// The ids of the choices marked correct, in document order.
    pub fn correct_ids(&self) -> Vec<&str> {
        self.choices
            .iter()
            .filter(|choice| choice.correct)
            .map(|choice| choice.id.as_str())
            .collect()
    }

    /// Copy this question with every choice reissued a fresh id. Sessions
    /// materialize their local questions through this so that answer
    /// records from one play-through can never alias another.
    pub fn with_fresh_choice_ids(&self, rng: &mut impl Rng) -> Question {
        let mut copy = self.clone();
        for choice in &mut copy.choices {
            choice.id = uid(rng);
        }
        copy
    }
}

/// Play options, resolved once when a document is constructed. Absent
/// fields in stored documents all default to off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizOptions {
    pub shuffle_questions: bool,
    pub shuffle_choices: bool,
    pub instant_feedback: bool,
}

/// A quiz document. Usable quizzes have at least one question; the parser
/// never produces an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: QuizOptions,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Fill in any identifiers missing from this document and its
    /// children. Imported legacy documents frequently lack some or all of
    /// them; they are regenerated rather than rejected.
    pub fn ensure_ids(&mut self, rng: &mut impl Rng) {
        if self
            .id
            .is_empty()
        {
            self.id = uid(rng);
        }
        for question in &mut self.questions {
            if question
                .id
                .is_empty()
            {
                question.id = uid(rng);
            }
            for choice in &mut question.choices {
                if choice
                    .id
                    .is_empty()
                {
                    choice.id = uid(rng);
                }
            }
        }
    }
}
