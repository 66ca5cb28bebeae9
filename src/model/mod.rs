// Types representing quiz documents

mod error;
mod sample;
mod types;

// Re-export all public symbols
pub use error::*;
pub use sample::*;
pub use types::*;
