//! Quiz session state machine
//!
//! A session steps through a fixed case list: each question is answered
//! exactly once (`submit`), then the session moves on (`advance`) until it
//! runs off the end and finishes. Illegal transitions come back as typed
//! errors and leave the session untouched; nothing here panics or corrupts
//! state.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{Case, Catalog};

use super::models::{AnswerState, Attempt, QuizResult, SavedProgress};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no cases match the chosen filters")]
    NoCases,

    #[error("the current question was already answered")]
    AlreadyAnswered,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("the session is already finished")]
    Finished,

    #[error("'{0}' is not an option for the current case")]
    UnknownOption(String),
}

/// Outcome of an `advance` call
#[derive(Debug)]
pub enum Advance {
    /// Moved to the next question
    Next,
    /// The session just finished; this is its one summary record
    Finished(QuizResult),
}

/// One run of N questions, from start to finish or discard
///
/// The case list is fixed at start and never re-ordered; `index ==
/// cases.len()` is the terminal state.
#[derive(Debug)]
pub struct QuizSession {
    session_id: Uuid,
    cases: Vec<Case>,
    index: usize,
    score: u32,
    answer: Option<AnswerState>,
}

impl QuizSession {
    /// Start a fresh session over an already-resolved case list
    pub fn start(cases: Vec<Case>) -> Result<Self, SessionError> {
        if cases.is_empty() {
            return Err(SessionError::NoCases);
        }
        Ok(Self {
            session_id: Uuid::new_v4(),
            cases,
            index: 0,
            score: 0,
            answer: None,
        })
    }

    /// Answer the current question
    ///
    /// Legal only while the current question is unanswered. Scores at most
    /// once per question; a second submit is rejected without touching the
    /// score or producing another attempt.
    pub fn submit(&mut self, selected: &str) -> Result<Attempt, SessionError> {
        let case = self.current_case().ok_or(SessionError::Finished)?;
        if self.answer.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        if !case.has_option(selected) {
            return Err(SessionError::UnknownOption(selected.to_string()));
        }

        let is_correct = selected == case.correct_answer;
        let attempt = Attempt::new(self.session_id, case, selected, is_correct);

        self.answer = Some(AnswerState {
            selected: selected.to_string(),
            is_correct,
        });
        if is_correct {
            self.score += 1;
        }

        Ok(attempt)
    }

    /// Move past an answered question
    ///
    /// Legal only once the current question has been answered. Stepping past
    /// the last question finishes the session and yields its QuizResult;
    /// Finished is terminal.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if self.answer.is_none() {
            return Err(SessionError::NotAnswered);
        }

        self.index += 1;
        self.answer = None;

        if self.index < self.cases.len() {
            Ok(Advance::Next)
        } else {
            Ok(Advance::Finished(QuizResult {
                session_id: self.session_id,
                date: Utc::now().date_naive(),
                score: self.score,
                total: self.cases.len(),
            }))
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The case at the current position, `None` once finished
    pub fn current_case(&self) -> Option<&Case> {
        self.cases.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Submission state of the current question
    pub fn answer(&self) -> Option<&AnswerState> {
        self.answer.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.cases.len()
    }

    /// Durable snapshot of this session's resumable fields
    pub fn snapshot(&self) -> SavedProgress {
        SavedProgress {
            session_id: self.session_id,
            case_ids: self.cases.iter().map(|c| c.id.clone()).collect(),
            current_index: self.index,
            score: self.score,
            total: self.cases.len(),
            updated_at: Utc::now(),
        }
    }

    /// Reconstruct a session from a snapshot and the current catalog
    ///
    /// Saved case ids with no catalog match are dropped; if none survive,
    /// resume fails closed and `None` is returned. The index is clamped to
    /// the surviving list, the session id and score carry over, and the
    /// per-question sub-state resets to unanswered.
    pub fn rehydrate(snapshot: &SavedProgress, catalog: &Catalog) -> Option<Self> {
        let cases: Vec<Case> = snapshot
            .case_ids
            .iter()
            .filter_map(|id| {
                let case = catalog.get(id);
                if case.is_none() {
                    log::warn!("dropping saved case id {} (not in catalog)", id);
                }
                case.cloned()
            })
            .collect();

        if cases.is_empty() {
            return None;
        }

        let index = snapshot.current_index.min(cases.len() - 1);
        Some(Self {
            session_id: snapshot.session_id,
            cases,
            index,
            score: snapshot.score,
            answer: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Subject;
    use std::collections::BTreeMap;

    fn case(id: &str, correct: &str, other: &str) -> Case {
        Case {
            id: id.to_string(),
            image_url: format!("/images/{}.png", id),
            vignette: "A test vignette.".to_string(),
            correct_answer: correct.to_string(),
            options: vec![correct.to_string(), other.to_string()],
            explanations: BTreeMap::new(),
            subject: Subject::Clinical,
            fitzpatrick: None,
            tags: vec!["test".to_string()],
            skin_tone_notes: None,
        }
    }

    fn three_cases() -> Vec<Case> {
        vec![
            case("c-1", "A", "B"),
            case("c-2", "C", "D"),
            case("c-3", "E", "F"),
        ]
    }

    #[test]
    fn test_start_requires_cases() {
        assert_eq!(QuizSession::start(Vec::new()).unwrap_err(), SessionError::NoCases);
    }

    #[test]
    fn test_happy_path_scores_and_finishes() {
        let mut session = QuizSession::start(three_cases()).unwrap();
        assert_eq!(session.index(), 0);
        assert_eq!(session.score(), 0);

        // correct, correct, incorrect
        let a1 = session.submit("A").unwrap();
        assert!(a1.was_correct);
        assert!(matches!(session.advance().unwrap(), Advance::Next));

        let a2 = session.submit("C").unwrap();
        assert!(a2.was_correct);
        assert!(matches!(session.advance().unwrap(), Advance::Next));

        let a3 = session.submit("F").unwrap();
        assert!(!a3.was_correct);

        match session.advance().unwrap() {
            Advance::Finished(result) => {
                assert_eq!(result.score, 2);
                assert_eq!(result.total, 3);
                assert_eq!(result.session_id, session.session_id());
            }
            Advance::Next => panic!("expected the session to finish"),
        }
        assert!(session.is_finished());
        assert!(session.current_case().is_none());
    }

    #[test]
    fn test_double_submit_is_rejected_and_does_not_double_count() {
        let mut session = QuizSession::start(three_cases()).unwrap();

        session.submit("A").unwrap();
        let score_after_first = session.score();

        assert_eq!(session.submit("A").unwrap_err(), SessionError::AlreadyAnswered);
        assert_eq!(session.submit("B").unwrap_err(), SessionError::AlreadyAnswered);
        assert_eq!(session.score(), score_after_first);
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_advance_requires_an_answer() {
        let mut session = QuizSession::start(three_cases()).unwrap();
        assert_eq!(session.advance().unwrap_err(), SessionError::NotAnswered);
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut session = QuizSession::start(three_cases()).unwrap();
        assert_eq!(
            session.submit("Nope").unwrap_err(),
            SessionError::UnknownOption("Nope".to_string())
        );
        // Still unanswered; a valid submit goes through
        assert!(session.answer().is_none());
        session.submit("A").unwrap();
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut session = QuizSession::start(vec![case("c-1", "A", "B")]).unwrap();
        session.submit("A").unwrap();
        assert!(matches!(session.advance().unwrap(), Advance::Finished(_)));

        assert_eq!(session.submit("A").unwrap_err(), SessionError::Finished);
        assert_eq!(session.advance().unwrap_err(), SessionError::Finished);
        assert_eq!(session.score(), 1);
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_answer_state_resets_on_advance() {
        let mut session = QuizSession::start(three_cases()).unwrap();
        session.submit("B").unwrap();
        assert!(session.answer().is_some());

        session.advance().unwrap();
        assert!(session.answer().is_none());
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_score_equals_correct_attempts() {
        let mut session = QuizSession::start(three_cases()).unwrap();
        let mut correct_attempts = 0;

        for selected in ["A", "D", "E"] {
            let attempt = session.submit(selected).unwrap();
            if attempt.was_correct {
                correct_attempts += 1;
            }
            session.advance().unwrap();
        }

        assert_eq!(session.score(), correct_attempts);
        assert!(session.score() as usize <= session.total());
    }

    #[test]
    fn test_snapshot_rehydrate_round_trip() {
        let catalog = Catalog::from_cases(three_cases()).unwrap();
        let mut session = QuizSession::start(three_cases()).unwrap();
        session.submit("A").unwrap();
        session.advance().unwrap();

        let snapshot = session.snapshot();
        let resumed = QuizSession::rehydrate(&snapshot, &catalog).unwrap();

        assert_eq!(resumed.session_id(), session.session_id());
        assert_eq!(resumed.index(), 1);
        assert_eq!(resumed.score(), 1);
        assert_eq!(resumed.total(), 3);
        assert!(resumed.answer().is_none());
        assert_eq!(resumed.current_case().unwrap().id, "c-2");
    }

    #[test]
    fn test_rehydrate_drops_unknown_ids_and_clamps_index() {
        // Catalog lost c-2 and c-3 since the snapshot was taken
        let catalog = Catalog::from_cases(vec![case("c-1", "A", "B")]).unwrap();
        let snapshot = SavedProgress {
            session_id: Uuid::new_v4(),
            case_ids: vec!["c-1".to_string(), "c-2".to_string(), "c-3".to_string()],
            current_index: 2,
            score: 1,
            total: 3,
            updated_at: Utc::now(),
        };

        let resumed = QuizSession::rehydrate(&snapshot, &catalog).unwrap();
        assert_eq!(resumed.total(), 1);
        assert_eq!(resumed.index(), 0);
        assert_eq!(resumed.score(), 1);
        assert_eq!(resumed.session_id(), snapshot.session_id);
    }

    #[test]
    fn test_rehydrate_fails_closed_when_nothing_survives() {
        let catalog = Catalog::from_cases(vec![case("other", "A", "B")]).unwrap();
        let snapshot = SavedProgress {
            session_id: Uuid::new_v4(),
            case_ids: vec!["gone-1".to_string(), "gone-2".to_string()],
            current_index: 1,
            score: 1,
            total: 2,
            updated_at: Utc::now(),
        };

        assert!(QuizSession::rehydrate(&snapshot, &catalog).is_none());
    }
}
