//! Single-slot autosave store for session progress
//!
//! One snapshot per identity namespace, overwritten on every meaningful
//! session change. Persistence is best-effort throughout: a failed write is
//! logged and swallowed (in-memory state stays authoritative), and a missing
//! or corrupt slot reads as absent.

use crate::identity::Identity;
use crate::quiz::models::SavedProgress;

use super::keys;
use super::kv::KeyValueStore;

/// The resume slot for one identity namespace
pub struct ProgressStore<'a> {
    store: &'a dyn KeyValueStore,
    key: String,
}

impl<'a> ProgressStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore, identity: &Identity) -> Self {
        Self {
            store,
            key: keys::progress_key(identity.namespace()),
        }
    }

    /// Overwrite the slot. Safe to call redundantly.
    pub fn save(&self, snapshot: &SavedProgress) {
        let json = match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not serialize progress snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &json) {
            log::warn!("could not save progress snapshot: {}", e);
        }
    }

    /// Last-saved snapshot, or `None` if absent or unreadable
    pub fn load(&self) -> Option<SavedProgress> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("could not read progress snapshot: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("ignoring corrupt progress snapshot: {}", e);
                None
            }
        }
    }

    /// Delete the slot (on completion or explicit discard)
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            log::warn!("could not clear progress snapshot: {}", e);
        }
    }
}
