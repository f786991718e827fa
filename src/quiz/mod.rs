//! Quiz core: configuration resolution and the session state machine
//!
//! This module provides:
//! - Session configuration resolution (filter, shuffle, truncate)
//! - The QuizSession state machine (submit/advance, terminal Finished state)
//! - Snapshot and rehydrate for autosave/resume

pub mod generator;
pub mod models;
pub mod session;

pub use generator::generate;
pub use models::{AnswerState, Attempt, QuizResult, SavedProgress, SessionConfig};
pub use session::{Advance, QuizSession, SessionError};
