//! Render a quiz document back to the plain-text format, so a saved quiz
//! can be pulled into an editor, changed, and re-parsed. Re-parsing the
//! rendered text reproduces the same questions, choice texts, and
//! correctness flags (ids are session/parse artifacts and will differ).

use crate::model::Quiz;
use crate::parsing::parser::{CORRECT_MARK, INCORRECT_MARK};

pub fn render_quiz_text(quiz: &Quiz) -> String {
    let blocks: Vec<String> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let mut lines = Vec::new();
            lines.push(format!("{}) {}", i + 1, question.text));
            for choice in &question.choices {
                let mark = if choice.correct {
                    CORRECT_MARK
                } else {
                    INCORRECT_MARK
                };
                lines.push(format!("{} {}", mark, choice.text));
            }
            if !question
                .explanation
                .is_empty()
            {
                lines.push(format!("explain: {}", question.explanation));
            }
            lines.join("\n")
        })
        .collect();

    format!("# Quiz: {}\n\n{}", quiz.name, blocks.join("\n\n-\n\n"))
}
