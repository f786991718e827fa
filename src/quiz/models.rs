//! Data models for quiz sessions and their records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Case, Fitzpatrick, Subject};

/// Learner-chosen quiz configuration
///
/// An empty `fitzpatricks` list means "no tone filter": every case passes,
/// including tone-agnostic cases with no classification at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Desired question count; honored by truncation, never by error
    pub count: usize,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub fitzpatricks: Vec<Fitzpatrick>,
}

impl SessionConfig {
    /// Config that admits the whole catalog, truncated to `count`
    pub fn all_subjects(count: usize) -> Self {
        Self {
            count,
            subjects: Subject::ALL.to_vec(),
            fitzpatricks: Vec::new(),
        }
    }
}

/// Transient per-question state; reset whenever the position changes
#[derive(Debug, Clone)]
pub struct AnswerState {
    pub selected: String,
    pub is_correct: bool,
}

/// Record of one answered question within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub session_id: Uuid,
    pub case_id: String,
    pub selected_answer: String,
    pub was_correct: bool,
    pub subject: Subject,
    /// Tags copied from the case at answer time
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    pub fn new(session_id: Uuid, case: &Case, selected: &str, was_correct: bool) -> Self {
        Self {
            session_id,
            case_id: case.id.clone(),
            selected_answer: selected.to_string(),
            was_correct,
            subject: case.subject,
            tags: case.tags.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Summary record of one completed session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub session_id: Uuid,
    /// Calendar date of completion (UTC)
    pub date: NaiveDate,
    pub score: u32,
    pub total: usize,
}

/// Durable shadow of a session, one slot per identity namespace
///
/// Holds case ids rather than full cases; resume rehydrates them from the
/// catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub session_id: Uuid,
    pub case_ids: Vec<String>,
    pub current_index: usize,
    pub score: u32,
    pub total: usize,
    pub updated_at: DateTime<Utc>,
}
