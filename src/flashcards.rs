//! Flashcards derived from a quiz: front is the question, back is every
//! choice marked correct.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{uid, Question};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    /// 1-based position of the source question.
    pub i: usize,
    pub front: String,
    pub back: String,
}

/// One card per question, keeping the question order.
pub fn from_questions(questions: &[Question], rng: &mut impl Rng) -> Vec<Flashcard> {
    questions
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let correct: Vec<&str> = question
                .choices
                .iter()
                .filter(|choice| choice.correct)
                .map(|choice| choice.text.as_str())
                .collect();
            let back = if correct.is_empty() {
                "(No correct marked)".to_string()
            } else {
                correct.join("\n")
            };
            Flashcard {
                id: uid(rng),
                i: idx + 1,
                front: question
                    .text
                    .clone(),
                back,
            }
        })
        .collect()
}
