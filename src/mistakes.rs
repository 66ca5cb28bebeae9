//! The rolling log of incorrect submissions. Entries are durable
//! snapshots, independent of the quiz or session that produced them.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{uid, Choice, Question};

/// Oldest entries are evicted beyond this many.
pub const MISTAKE_CAP: usize = 500;

/// Everything needed to review one wrong answer later: the question and
/// choice texts as they appeared (session-local ids and all), what was
/// chosen, and what would have been right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeEntry {
    #[serde(default)]
    pub id: String,
    pub at: DateTime<Utc>,
    pub quiz_id: String,
    pub quiz_name: String,
    pub question: String,
    pub choices: Vec<Choice>,
    pub chosen: Vec<String>,
    pub correct_ids: Vec<String>,
}

impl MistakeEntry {
    /// Snapshot an incorrect submission against a session-local question.
    pub fn capture(
        question: &Question,
        chosen: &[String],
        quiz_id: &str,
        quiz_name: &str,
        rng: &mut impl Rng,
    ) -> MistakeEntry {
        MistakeEntry {
            id: uid(rng),
            at: Utc::now(),
            quiz_id: quiz_id.to_string(),
            quiz_name: quiz_name.to_string(),
            question: question
                .text
                .clone(),
            choices: question
                .choices
                .clone(),
            chosen: chosen.to_vec(),
            correct_ids: question
                .correct_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The process-wide mistake log: an all-time view capped at
/// [`MISTAKE_CAP`] entries, plus a view of just the active session,
/// cleared whenever a new session begins. Both are most-recent-first.
#[derive(Debug, Default)]
pub struct MistakeLog {
    entries: Vec<MistakeEntry>,
    current: Vec<MistakeEntry>,
}

impl MistakeLog {
    /// Rehydrate the all-time log from storage. The current-session view
    /// always starts empty.
    pub fn from_entries(mut entries: Vec<MistakeEntry>) -> MistakeLog {
        entries.truncate(MISTAKE_CAP);
        MistakeLog {
            entries,
            current: Vec::new(),
        }
    }

    /// A new session is starting; its view resets. The all-time log is
    /// untouched.
    pub fn begin_session(&mut self) {
        self.current
            .clear();
    }

    /// Prepend an entry to both views, then trim the all-time log from
    /// the tail back to the cap.
    pub fn record(&mut self, entry: MistakeEntry) {
        self.current
            .insert(0, entry.clone());
        self.entries
            .insert(0, entry);
        self.entries
            .truncate(MISTAKE_CAP);
    }

    pub fn all(&self) -> &[MistakeEntry] {
        &self.entries
    }

    pub fn current_session(&self) -> &[MistakeEntry] {
        &self.current
    }

    pub fn clear(&mut self) {
        self.entries
            .clear();
        self.current
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }
}
