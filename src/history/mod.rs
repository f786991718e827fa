//! Attempt/result history: per-namespace logs, review, and statistics

pub mod log;
pub mod review;
pub mod stats;

pub use log::HistoryLog;
pub use review::{explanation_lines, session_review, ReviewEntry, SessionReview};
pub use stats::{by_subject, by_tag, overall, PerformanceStats, SubjectStats, TagStats};
