//! Parse plain-text quizzes, play them through an interactive session, and
//! keep a rolling log of the mistakes made along the way.

pub mod collection;
pub mod flashcards;
pub mod formatting;
pub mod interchange;
pub mod mistakes;
pub mod model;
pub mod parsing;
pub mod session;
pub mod storage;
