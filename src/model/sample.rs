//! The built-in sample document, used to seed an otherwise empty
//! collection so the player has something to demonstrate with.

use rand::Rng;

use crate::model::{uid, Choice, Question, Quiz, QuizOptions};

pub fn sample_quiz(rng: &mut impl Rng) -> Quiz {
    let mut quiz = Quiz {
        id: String::new(),
        name: "Sample — Emoji Format".to_string(),
        options: QuizOptions {
            shuffle_questions: false,
            shuffle_choices: false,
            instant_feedback: true,
        },
        questions: vec![
            Question {
                id: String::new(),
                text: "What does ACE stand for?".to_string(),
                explanation: "ACE converts angiotensin I to angiotensin II.".to_string(),
                choices: vec![
                    choice("Angiotensin-Converting Enzyme", true),
                    choice("Acetylcholine Esterase", false),
                    choice("Adenosine Cyclase Enzyme", false),
                    choice("Acid Citrate Enzyme", false),
                ],
            },
            Question {
                id: String::new(),
                text: "Which of the following are ARBs? (Select all that apply)".to_string(),
                explanation: "ARBs end with -sartan.".to_string(),
                choices: vec![
                    choice("Losartan", true),
                    choice("Valsartan", true),
                    choice("Amlodipine", false),
                    choice("Metoprolol", false),
                ],
            },
        ],
    };
    quiz.ensure_ids(rng);
    quiz
}

fn choice(text: &str, correct: bool) -> Choice {
    Choice {
        id: String::new(),
        text: text.to_string(),
        correct,
    }
}
