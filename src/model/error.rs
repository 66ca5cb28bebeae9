use std::fmt;
use std::path::PathBuf;

/// A quiz file could not be read from disk. Distinct from a parse
/// failure; the content never made it into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError {
    pub problem: String,
    pub details: String,
    pub filename: PathBuf,
}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.problem,
            self.details,
            self.filename
                .display()
        )
    }
}
