//! Session review assembly
//!
//! Joins a finished (or in-flight) session's attempts back against the
//! catalog and builds the merged explanation block shown after an answer:
//! the correct option first, then each incorrect option, every line carrying
//! an explicit Correct/Incorrect prefix.

use uuid::Uuid;

use crate::catalog::{Case, Catalog};
use crate::quiz::models::{Attempt, QuizResult};

use super::log::HistoryLog;

/// One explanation line in the merged block
#[derive(Debug, Clone)]
pub struct ExplanationLine {
    pub label: String,
    pub text: String,
    pub is_correct: bool,
}

/// One reviewed question: the attempt plus its case, if it still exists
#[derive(Debug, Clone)]
pub struct ReviewEntry {
    pub attempt: Attempt,
    pub case: Option<Case>,
}

/// Everything the review surface needs for one session
#[derive(Debug, Clone)]
pub struct SessionReview {
    pub summary: Option<QuizResult>,
    pub entries: Vec<ReviewEntry>,
}

/// Merged explanation lines for a case: correct answer first, then the rest
pub fn explanation_lines(case: &Case) -> Vec<ExplanationLine> {
    let mut lines = Vec::with_capacity(case.options.len());

    lines.push(ExplanationLine {
        label: case.correct_answer.clone(),
        text: with_prefix(case.explanation_for(&case.correct_answer), "Correct."),
        is_correct: true,
    });

    for option in &case.options {
        if *option == case.correct_answer {
            continue;
        }
        lines.push(ExplanationLine {
            label: option.clone(),
            text: with_prefix(case.explanation_for(option), "Incorrect."),
            is_correct: false,
        });
    }

    lines
}

/// Assemble the review for one session from its logs and the catalog
///
/// Attempts whose case id no longer resolves keep their entry with no case;
/// renderers skip those rather than invent content.
pub fn session_review(log: &HistoryLog, catalog: &Catalog, session_id: Uuid) -> SessionReview {
    let entries = log
        .session_attempts(session_id)
        .into_iter()
        .map(|attempt| {
            let case = catalog.get(&attempt.case_id).cloned();
            ReviewEntry { attempt, case }
        })
        .collect();

    SessionReview {
        summary: log.result(session_id),
        entries,
    }
}

fn with_prefix(text: &str, prefix: &str) -> String {
    if text.starts_with(prefix) {
        text.to_string()
    } else {
        format!("{} {}", prefix, text)
    }
}
