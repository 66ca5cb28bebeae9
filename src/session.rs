//! The interactive quiz session: one active play-through of a quiz
//! document, with its own (possibly shuffled) question order, per-question
//! answer records, and running score.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::mistakes::MistakeEntry;
use crate::model::{Question, Quiz, QuizOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The user tried to check an answer with nothing selected.
    EmptySelection,
    /// A question id that is not part of this session. Selections are
    /// built from the session's own question list, so reaching this is a
    /// caller bug, surfaced rather than panicked on.
    UnknownQuestion(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptySelection => write!(f, "select an option first"),
            SessionError::UnknownQuestion(id) => {
                write!(f, "question '{}' is not part of this session", id)
            }
        }
    }
}

/// The recorded outcome for one answered question. Re-submitting replaces
/// the record outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub selected_ids: Vec<String>,
    pub correct: bool,
}

/// What a submission produced: the correctness verdict and, when wrong,
/// the mistake snapshot for the recorder. At most one snapshot is
/// produced per submission call.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub mistake: Option<MistakeEntry>,
}

/// Correct-so-far over attempted-so-far; accuracy to date, not weighted
/// by how much of the quiz remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub attempted: usize,
}

/// The final reckoning for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub correct: usize,
    pub total: usize,
    /// Whole-number percentage, correct over total question count.
    pub accuracy: u32,
    pub elapsed: Duration,
}

impl Summary {
    /// Elapsed wall-clock time as minutes and seconds, e.g. "3m 41s".
    pub fn clock(&self) -> String {
        let seconds = self
            .elapsed
            .as_secs();
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}

/// One active play-through. Sessions copy their questions out of the
/// source document (shuffled per the options) and mint fresh choice ids,
/// so nothing a session does can disturb the document, and answer records
/// are only meaningful within the session that made them.
#[derive(Debug)]
pub struct Session {
    quiz_id: String,
    name: String,
    options: QuizOptions,
    idx: usize,
    start: Instant,
    answers: HashMap<String, AnswerRecord>,
    questions: Vec<Question>,
}

impl Session {
    /// Materialize a session from a quiz document. Choice lists are
    /// shuffled per question iff `shuffleChoices`; question order is
    /// shuffled iff `shuffleQuestions`; the document itself is never
    /// reordered.
    pub fn start(quiz: &Quiz, rng: &mut impl Rng) -> Session {
        let mut questions: Vec<Question> = quiz
            .questions
            .iter()
            .map(|question| {
                let mut copy = question.with_fresh_choice_ids(rng);
                if quiz
                    .options
                    .shuffle_choices
                {
                    copy.choices
                        .shuffle(rng);
                }
                copy
            })
            .collect();
        if quiz
            .options
            .shuffle_questions
        {
            questions.shuffle(rng);
        }

        Session {
            quiz_id: quiz
                .id
                .clone(),
            name: quiz
                .name
                .clone(),
            options: quiz.options,
            idx: 0,
            start: Instant::now(),
            answers: HashMap::new(),
            questions,
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> QuizOptions {
        self.options
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question under the cursor. Sessions are only started from
    /// documents with at least one question, so this only returns None
    /// for an (unreachable) empty session.
    pub fn current(&self) -> Option<&Question> {
        self.questions
            .get(self.idx)
    }

    /// Zero-based cursor and total count, for "Question 3 of 10" displays.
    pub fn position(&self) -> (usize, usize) {
        (
            self.idx,
            self.questions
                .len(),
        )
    }

    /// Move to the previous question; a no-op at the first.
    pub fn previous(&mut self) {
        if self.idx > 0 {
            self.idx -= 1;
        }
    }

    /// Move to the next question; a no-op at the last.
    pub fn next(&mut self) {
        if self.idx + 1
            < self
                .questions
                .len()
        {
            self.idx += 1;
        }
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.answers
            .get(question_id)
    }

    /// Check a selection against a question. Correct iff the chosen set
    /// exactly equals the set of correct choice ids; partial credit is
    /// never given. Records (or overwrites) the question's answer record,
    /// and on a wrong answer returns the mistake snapshot for the log.
    pub fn submit(
        &mut self,
        question_id: &str,
        chosen: &[String],
        rng: &mut impl Rng,
    ) -> Result<Verdict, SessionError> {
        if chosen.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let question = self
            .questions
            .iter()
            .find(|question| question.id == question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;

        let chosen_set: BTreeSet<&str> = chosen
            .iter()
            .map(String::as_str)
            .collect();
        let correct_set: BTreeSet<&str> = question
            .correct_ids()
            .into_iter()
            .collect();
        let correct = chosen_set == correct_set;

        let mistake = if correct {
            None
        } else {
            Some(MistakeEntry::capture(
                question,
                chosen,
                &self.quiz_id,
                &self.name,
                rng,
            ))
        };

        self.answers
            .insert(
                question_id.to_string(),
                AnswerRecord {
                    selected_ids: chosen.to_vec(),
                    correct,
                },
            );

        Ok(Verdict { correct, mistake })
    }

    /// Toggle a single choice. In instant-feedback mode a single-select
    /// question is evaluated on the spot through the same path as an
    /// explicit check, with the toggled choice as a singleton selection.
    /// Multi-select questions never auto-evaluate; the full selection is
    /// only known at an explicit submit.
    pub fn select(
        &mut self,
        question_id: &str,
        choice_id: &str,
        rng: &mut impl Rng,
    ) -> Result<Option<Verdict>, SessionError> {
        let question = self
            .questions
            .iter()
            .find(|question| question.id == question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;

        if self
            .options
            .instant_feedback
            && !question.is_multi_select()
        {
            let chosen = vec![choice_id.to_string()];
            return self
                .submit(question_id, &chosen, rng)
                .map(Some);
        }

        Ok(None)
    }

    pub fn score(&self) -> Score {
        Score {
            correct: self
                .answers
                .values()
                .filter(|record| record.correct)
                .count(),
            attempted: self
                .answers
                .len(),
        }
    }

    /// The final summary: accuracy over the whole question count (not just
    /// the attempted ones) and elapsed time since the session started.
    pub fn finish(&self) -> Summary {
        let total = self
            .questions
            .len();
        let correct = self
            .score()
            .correct;
        let accuracy = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };
        Summary {
            correct,
            total,
            accuracy,
            elapsed: self
                .start
                .elapsed(),
        }
    }
}
