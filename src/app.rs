//! Application facade
//!
//! `QuizApp` owns the catalog, the storage backend, the learner identity,
//! and the single active session. It exposes the hooks the presentation
//! layer drives (`on_generate`, `on_submit`, `on_advance`, `on_resume`,
//! `on_discard`) plus read accessors, and is where autosave and history
//! recording are wired to state transitions: every transition that changes
//! position, score, or sub-state overwrites the resume snapshot, and the
//! finish transition records the result and clears the snapshot.

use uuid::Uuid;

use crate::catalog::{Case, Catalog};
use crate::history::{self, HistoryLog, PerformanceStats, SessionReview, SubjectStats, TagStats};
use crate::identity::Identity;
use crate::quiz::models::{Attempt, QuizResult, SessionConfig};
use crate::quiz::{generator, Advance, QuizSession, SessionError};
use crate::storage::{migration, KeyValueStore, ProgressStore};

pub struct QuizApp {
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    identity: Identity,
    session: Option<QuizSession>,
}

impl QuizApp {
    /// Wire the facade together and run the one-time legacy migration
    pub fn new(catalog: Catalog, store: Box<dyn KeyValueStore>, identity: Identity) -> Self {
        if let Err(e) = migration::migrate_legacy_history(store.as_ref()) {
            log::warn!("legacy history migration failed: {}", e);
        }
        Self {
            catalog,
            store,
            identity,
            session: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Switch identity (sign-in/sign-out)
    ///
    /// Drops the in-memory session; the previous namespace's snapshot stays
    /// on disk and remains resumable under that identity.
    pub fn set_identity(&mut self, identity: Identity) {
        if identity != self.identity {
            self.identity = identity;
            self.session = None;
        }
    }

    // ===== Presentation hooks =====

    /// Start a new quiz from a configuration
    ///
    /// Resolving the config against the catalog may come up empty; that is a
    /// "cannot start" outcome and no session is created. A successful start
    /// replaces any previous session and overwrites the resume slot.
    pub fn on_generate(&mut self, config: &SessionConfig) -> Result<(), SessionError> {
        let cases = generator::generate(config, &self.catalog);
        let session = QuizSession::start(cases)?;

        self.progress().save(&session.snapshot());
        log::info!(
            "started session {} with {} questions",
            session.session_id(),
            session.total()
        );
        self.session = Some(session);
        Ok(())
    }

    /// Answer the current question; records the attempt and autosaves
    pub fn on_submit(&mut self, selected: &str) -> Result<Attempt, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::Finished)?;
        let attempt = session.submit(selected)?;
        let snapshot = session.snapshot();

        self.history().record_attempt(&attempt);
        self.progress().save(&snapshot);
        Ok(attempt)
    }

    /// Move to the next question, or finish the session
    ///
    /// Finishing records the QuizResult, clears the resume slot, and drops
    /// the in-memory session.
    pub fn on_advance(&mut self) -> Result<Advance, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::Finished)?;
        let outcome = session.advance()?;

        match &outcome {
            Advance::Next => {
                let snapshot = session.snapshot();
                self.progress().save(&snapshot);
            }
            Advance::Finished(result) => {
                log::info!(
                    "session {} finished: {}/{}",
                    result.session_id,
                    result.score,
                    result.total
                );
                self.history().record_result(result);
                self.progress().clear();
                self.session = None;
            }
        }
        Ok(outcome)
    }

    /// Try to resume the saved session for this identity
    ///
    /// Only attempted when no session is active in memory, so navigating
    /// around the app never replaces a quiz in progress. Returns whether a
    /// session was restored.
    pub fn on_resume(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(snapshot) = self.progress().load() else {
            return false;
        };
        match QuizSession::rehydrate(&snapshot, &self.catalog) {
            Some(session) => {
                log::info!(
                    "resumed session {} at question {}/{}",
                    session.session_id(),
                    session.index() + 1,
                    session.total()
                );
                self.session = Some(session);
                true
            }
            None => {
                log::warn!("saved session could not be rehydrated; starting fresh");
                false
            }
        }
    }

    /// Abandon the active and/or saved session without recording a result
    pub fn on_discard(&mut self) {
        self.progress().clear();
        if let Some(session) = self.session.take() {
            log::info!("discarded session {}", session.session_id());
        }
    }

    // ===== Read accessors =====

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn current_case(&self) -> Option<&Case> {
        self.session.as_ref().and_then(|s| s.current_case())
    }

    /// Whether a resume snapshot exists for this identity
    pub fn has_saved_progress(&self) -> bool {
        self.progress().load().is_some()
    }

    /// Completed quiz summaries, newest first
    pub fn results(&self) -> Vec<QuizResult> {
        self.history().results()
    }

    /// Every logged attempt for this identity, oldest first
    pub fn attempts(&self) -> Vec<Attempt> {
        self.history().attempts()
    }

    /// Full review data for one session
    pub fn session_review(&self, session_id: Uuid) -> SessionReview {
        history::session_review(&self.history(), &self.catalog, session_id)
    }

    pub fn overall_stats(&self) -> PerformanceStats {
        history::overall(&self.attempts())
    }

    pub fn subject_stats(&self) -> Vec<SubjectStats> {
        history::by_subject(&self.attempts())
    }

    pub fn tag_stats(&self) -> Vec<TagStats> {
        history::by_tag(&self.attempts())
    }

    /// Data-clearing utility: wipe this identity's attempt and result logs
    pub fn reset_history(&self) {
        let history = self.history();
        history.reset_attempts();
        history.reset_results();
    }

    /// Data-clearing utility: wipe this identity's attempt log only
    pub fn reset_attempts(&self) {
        self.history().reset_attempts();
    }

    /// Data-clearing utility: wipe this identity's result log only
    pub fn reset_results(&self) {
        self.history().reset_results();
    }

    fn progress(&self) -> ProgressStore<'_> {
        ProgressStore::new(self.store.as_ref(), &self.identity)
    }

    fn history(&self) -> HistoryLog<'_> {
        HistoryLog::new(self.store.as_ref(), &self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Fitzpatrick, Subject};
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn case(id: &str, subject: Subject, fitzpatrick: Option<Fitzpatrick>) -> Case {
        Case {
            id: id.to_string(),
            image_url: format!("/images/{}.png", id),
            vignette: "A test vignette.".to_string(),
            correct_answer: "A".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            explanations: BTreeMap::new(),
            subject,
            fitzpatrick,
            tags: Vec::new(),
            skin_tone_notes: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_cases(vec![
            case("c-1", Subject::Clinical, Some(Fitzpatrick::I)),
            case("c-2", Subject::Clinical, None),
            case("c-3", Subject::Histopathology, None),
        ])
        .unwrap()
    }

    /// Store handle that can outlive the app, to simulate process restarts
    #[derive(Clone, Default)]
    struct SharedStore(Rc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> crate::storage::kv::Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> crate::storage::kv::Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> crate::storage::kv::Result<()> {
            self.0.remove(key)
        }
    }

    fn app_with(store: SharedStore, identity: Identity) -> QuizApp {
        QuizApp::new(catalog(), Box::new(store), identity)
    }

    fn all_cases_config() -> SessionConfig {
        SessionConfig::all_subjects(3)
    }

    #[test]
    fn test_full_happy_path_records_result_and_clears_snapshot() {
        let store = SharedStore::default();
        let mut app = app_with(store.clone(), Identity::Anonymous);

        app.on_generate(&all_cases_config()).unwrap();
        assert_eq!(app.session().unwrap().total(), 3);
        assert!(app.has_saved_progress());

        let session_id = app.session().unwrap().session_id();

        // Answer every question; the catalog marks "A" correct everywhere,
        // answer the last one wrong.
        for i in 0..3 {
            let selected = if i < 2 { "A" } else { "B" };
            app.on_submit(selected).unwrap();
            app.on_advance().unwrap();
        }

        assert!(app.session().is_none());
        assert!(!app.has_saved_progress());

        let results = app.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].session_id, session_id);
        assert_eq!(results[0].score, 2);
        assert_eq!(results[0].total, 3);

        let stats = app.overall_stats();
        assert_eq!(stats.answered, 3);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.accuracy_percent(), 67);

        let review = app.session_review(session_id);
        assert_eq!(review.entries.len(), 3);
        assert!(review.summary.is_some());
    }

    #[test]
    fn test_empty_filter_cannot_start_and_creates_nothing() {
        let store = SharedStore::default();
        let mut app = app_with(store, Identity::Anonymous);

        // Zero questions requested: the resolver comes up empty
        let config = SessionConfig {
            count: 0,
            subjects: vec![Subject::Clinical],
            fitzpatricks: Vec::new(),
        };

        assert_eq!(app.on_generate(&config).unwrap_err(), SessionError::NoCases);
        assert!(app.session().is_none());
        assert!(!app.has_saved_progress());
    }

    #[test]
    fn test_interrupted_session_resumes_where_it_left_off() {
        let store = SharedStore::default();
        let session_id;
        let expected_score;
        {
            let mut app = app_with(store.clone(), Identity::Anonymous);
            app.on_generate(&all_cases_config()).unwrap();
            session_id = app.session().unwrap().session_id();

            // Two questions in, then the process goes away
            app.on_submit("A").unwrap();
            app.on_advance().unwrap();
            app.on_submit("B").unwrap();
            app.on_advance().unwrap();
            expected_score = app.session().unwrap().score();
        }

        let mut app = app_with(store, Identity::Anonymous);
        assert!(app.on_resume());

        let session = app.session().unwrap();
        assert_eq!(session.session_id(), session_id);
        assert_eq!(session.index(), 2);
        assert_eq!(session.score(), expected_score);
        assert!(session.answer().is_none());

        // The next submit operates on the third case
        let attempt = app.on_submit("A").unwrap();
        assert_eq!(attempt.session_id, session_id);
        assert_eq!(app.session().unwrap().index(), 2);
    }

    #[test]
    fn test_resume_does_not_replace_an_active_session() {
        let store = SharedStore::default();
        let mut app = app_with(store, Identity::Anonymous);

        app.on_generate(&all_cases_config()).unwrap();
        let active = app.session().unwrap().session_id();

        assert!(!app.on_resume());
        assert_eq!(app.session().unwrap().session_id(), active);
    }

    #[test]
    fn test_resume_with_no_snapshot_reports_false() {
        let store = SharedStore::default();
        let mut app = app_with(store, Identity::Anonymous);
        assert!(!app.on_resume());
        assert!(app.session().is_none());
    }

    #[test]
    fn test_double_submit_logs_one_attempt() {
        let store = SharedStore::default();
        let mut app = app_with(store, Identity::Anonymous);
        app.on_generate(&all_cases_config()).unwrap();

        app.on_submit("A").unwrap();
        assert!(app.on_submit("A").is_err());
        assert!(app.on_submit("B").is_err());

        assert_eq!(app.attempts().len(), 1);
        assert_eq!(app.session().unwrap().score(), 1);
    }

    #[test]
    fn test_discard_clears_snapshot_without_a_result() {
        let store = SharedStore::default();
        let mut app = app_with(store, Identity::Anonymous);

        app.on_generate(&all_cases_config()).unwrap();
        app.on_submit("A").unwrap();

        app.on_discard();
        assert!(app.session().is_none());
        assert!(!app.has_saved_progress());
        assert!(app.results().is_empty());
        // The submitted attempt stays in the log
        assert_eq!(app.attempts().len(), 1);
    }

    #[test]
    fn test_identity_switch_isolates_data_and_keeps_snapshots() {
        let store = SharedStore::default();
        let alice = Identity::User { id: "alice".to_string() };

        let mut app = app_with(store.clone(), alice.clone());
        app.on_generate(&all_cases_config()).unwrap();
        app.on_submit("A").unwrap();

        // Sign out mid-session
        app.set_identity(Identity::Anonymous);
        assert!(app.session().is_none());
        assert!(app.attempts().is_empty());
        assert!(!app.has_saved_progress());

        // Alice's snapshot survived the sign-out
        app.set_identity(alice);
        assert!(app.has_saved_progress());
        assert!(app.on_resume());
        assert_eq!(app.attempts().len(), 1);
    }

    #[test]
    fn test_reset_history_wipes_logs_for_current_identity_only() {
        let store = SharedStore::default();
        let alice = Identity::User { id: "alice".to_string() };

        let mut app = app_with(store.clone(), alice.clone());
        app.on_generate(&all_cases_config()).unwrap();
        app.on_submit("A").unwrap();

        let mut anon = app_with(store, Identity::Anonymous);
        anon.on_generate(&all_cases_config()).unwrap();
        anon.on_submit("A").unwrap();

        anon.reset_history();
        assert!(anon.attempts().is_empty());
        assert_eq!(app.attempts().len(), 1);
    }
}
