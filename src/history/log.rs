//! Attempt and result logs
//!
//! Two append-only logs per identity namespace: attempts in chronological
//! order, results newest-first. Individual entries are never updated or
//! deleted; the only destructive operation is a whole-log reset. Reads treat
//! missing or corrupt data as empty; writes are best-effort.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::identity::Identity;
use crate::quiz::models::{Attempt, QuizResult};
use crate::storage::keys;
use crate::storage::KeyValueStore;

/// The attempt/result logs for one identity namespace
pub struct HistoryLog<'a> {
    store: &'a dyn KeyValueStore,
    attempts_key: String,
    results_key: String,
}

impl<'a> HistoryLog<'a> {
    pub fn new(store: &'a dyn KeyValueStore, identity: &Identity) -> Self {
        let namespace = identity.namespace();
        Self {
            store,
            attempts_key: keys::attempts_key(namespace),
            results_key: keys::results_key(namespace),
        }
    }

    /// Append one attempt (chronological order)
    pub fn record_attempt(&self, attempt: &Attempt) {
        let mut attempts = self.attempts();
        attempts.push(attempt.clone());
        self.write(&self.attempts_key, &attempts);
    }

    /// Prepend one result (newest-first read contract)
    pub fn record_result(&self, result: &QuizResult) {
        let mut results = self.results();
        results.insert(0, result.clone());
        self.write(&self.results_key, &results);
    }

    /// All attempts in this namespace, oldest first
    pub fn attempts(&self) -> Vec<Attempt> {
        self.read(&self.attempts_key)
    }

    /// Attempts belonging to one session, oldest first
    pub fn session_attempts(&self, session_id: Uuid) -> Vec<Attempt> {
        self.attempts()
            .into_iter()
            .filter(|a| a.session_id == session_id)
            .collect()
    }

    /// All results in this namespace, newest first
    pub fn results(&self) -> Vec<QuizResult> {
        self.read(&self.results_key)
    }

    /// Summary for one session, if it completed
    pub fn result(&self, session_id: Uuid) -> Option<QuizResult> {
        self.results().into_iter().find(|r| r.session_id == session_id)
    }

    /// Drop the whole attempt log (data-clearing utility only)
    pub fn reset_attempts(&self) {
        if let Err(e) = self.store.remove(&self.attempts_key) {
            log::warn!("could not reset attempt log: {}", e);
        }
    }

    /// Drop the whole result log (data-clearing utility only)
    pub fn reset_results(&self) {
        if let Err(e) = self.store.remove(&self.results_key) {
            log::warn!("could not reset result log: {}", e);
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("could not read {}: {}", key, e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("ignoring corrupt log at {}: {}", key, e);
                Vec::new()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, entries: &[T]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not serialize {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            log::warn!("could not write {}: {}", key, e);
        }
    }
}
