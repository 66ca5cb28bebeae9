//! The ordered collection of saved quizzes, with the save-or-overwrite
//! semantics the builder uses: saving an edited draft lands on the quiz
//! it came from, saving under an existing name overwrites that quiz, and
//! anything genuinely new goes to the front of the list.

use crate::model::{normalize_name, Quiz};

/// How a draft landed in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created,
    Overwrote,
}

#[derive(Debug, Default)]
pub struct Collection {
    quizzes: Vec<Quiz>,
}

impl Collection {
    pub fn new(quizzes: Vec<Quiz>) -> Collection {
        Collection { quizzes }
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn len(&self) -> usize {
        self.quizzes
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes
            .is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Quiz> {
        self.quizzes
            .iter()
            .find(|quiz| quiz.id == id)
    }

    /// Look a quiz up by name, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Quiz> {
        let wanted = normalize_name(name);
        self.quizzes
            .iter()
            .find(|quiz| normalize_name(&quiz.name) == wanted)
    }

    /// Save a parsed draft. A draft whose id is already present replaces
    /// that quiz in place. Failing that, a draft whose normalized name
    /// matches an existing quiz overwrites that quiz's content while
    /// keeping the stored id and name. Otherwise the draft is new and is
    /// prepended.
    pub fn save(&mut self, draft: Quiz) -> Saved {
        if let Some(existing) = self
            .quizzes
            .iter_mut()
            .find(|quiz| quiz.id == draft.id)
        {
            *existing = draft;
            return Saved::Overwrote;
        }

        let wanted = normalize_name(&draft.name);
        if let Some(existing) = self
            .quizzes
            .iter_mut()
            .find(|quiz| normalize_name(&quiz.name) == wanted)
        {
            existing.options = draft.options;
            existing.questions = draft.questions;
            return Saved::Overwrote;
        }

        self.quizzes
            .insert(0, draft);
        Saved::Created
    }

    /// Prepend imported quizzes, keeping the payload's order.
    pub fn import(&mut self, incoming: Vec<Quiz>) {
        for quiz in incoming
            .into_iter()
            .rev()
        {
            self.quizzes
                .insert(0, quiz);
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self
            .quizzes
            .len();
        self.quizzes
            .retain(|quiz| quiz.id != id);
        self.quizzes
            .len()
            < before
    }

    pub fn clear(&mut self) {
        self.quizzes
            .clear();
    }
}
