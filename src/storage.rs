//! Directory-backed persistence for the quiz collection and the mistake
//! log, with the same tolerance the browser storage layer had: a store
//! that is missing or holds a corrupt value loads as empty, with a
//! warning, and never takes the session down with it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::mistakes::{MistakeEntry, MISTAKE_CAP};
use crate::model::Quiz;

const QUIZZES_FILE: &str = "quizzes.json";
const MISTAKES_FILE: &str = "mistakes.json";

#[derive(Debug)]
pub struct StorageError {
    pub problem: String,
    pub details: String,
    pub path: PathBuf,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.problem,
            self.details,
            self.path
                .display()
        )
    }
}

/// A store directory holding one JSON file per collection. Loads are
/// infallible by contract; saves report their failures as values.
#[derive(Debug, Clone)]
pub struct Store {
    directory: PathBuf,
}

impl Store {
    pub fn open(directory: impl Into<PathBuf>) -> Store {
        Store {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn load_quizzes(&self) -> Vec<Quiz> {
        self.load_value(QUIZZES_FILE)
    }

    pub fn save_quizzes(&self, quizzes: &[Quiz]) -> Result<(), StorageError> {
        self.save_value(QUIZZES_FILE, &quizzes)
    }

    pub fn load_mistakes(&self) -> Vec<MistakeEntry> {
        self.load_value(MISTAKES_FILE)
    }

    /// The retention cap is enforced here as well as in the in-memory
    /// log, so an over-long stored value can never round-trip.
    pub fn save_mistakes(&self, entries: &[MistakeEntry]) -> Result<(), StorageError> {
        let capped = &entries[..entries
            .len()
            .min(MISTAKE_CAP)];
        self.save_value(MISTAKES_FILE, &capped)
    }

    fn load_value<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self
            .directory
            .join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored value yet");
                return Vec::new();
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "load failed, treating store as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(error) => {
                warn!(path = %path.display(), %error, "stored value is corrupt, treating store as empty");
                Vec::new()
            }
        }
    }

    fn save_value<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.directory).map_err(|error| StorageError {
            problem: "Failed creating store directory".to_string(),
            details: error.to_string(),
            path: self
                .directory
                .clone(),
        })?;
        let path = self
            .directory
            .join(file);
        let text = serde_json::to_string_pretty(value).map_err(|error| StorageError {
            problem: "Failed encoding store value".to_string(),
            details: error.to_string(),
            path: path.clone(),
        })?;
        fs::write(&path, text).map_err(|error| StorageError {
            problem: "Failed writing".to_string(),
            details: error.to_string(),
            path,
        })
    }
}
