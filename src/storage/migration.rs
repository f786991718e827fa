//! One-time migration of pre-namespacing data
//!
//! Earlier versions kept a single attempt log and result log with no
//! identity namespace. This moves that data into the anonymous namespace on
//! first run, then writes a marker key so the legacy keys are never checked
//! again. An already-populated anonymous log is never overwritten.

use crate::identity::ANONYMOUS_NAMESPACE;

use super::keys;
use super::kv::{KeyValueStore, Result};

/// Migrate the legacy attempt/result keys into the anonymous namespace
/// (one-time).
///
/// - If the marker key exists, this is a no-op.
/// - Each legacy key is moved only when the namespaced destination is empty.
/// - Legacy keys are removed once handled.
pub fn migrate_legacy_history(store: &dyn KeyValueStore) -> Result<()> {
    if store.get(keys::MIGRATION_MARKER_KEY)?.is_some() {
        return Ok(());
    }

    migrate_key(
        store,
        keys::LEGACY_ATTEMPTS_KEY,
        &keys::attempts_key(ANONYMOUS_NAMESPACE),
    )?;
    migrate_key(
        store,
        keys::LEGACY_RESULTS_KEY,
        &keys::results_key(ANONYMOUS_NAMESPACE),
    )?;

    store.set(keys::MIGRATION_MARKER_KEY, "migrated")?;
    log::info!("legacy history migration complete");

    Ok(())
}

fn migrate_key(store: &dyn KeyValueStore, legacy: &str, target: &str) -> Result<()> {
    let Some(value) = store.get(legacy)? else {
        return Ok(());
    };

    if store.get(target)?.is_none() {
        log::info!("migrating legacy key {} -> {}", legacy, target);
        store.set(target, &value)?;
    } else {
        log::info!("skipping legacy key {} (destination already populated)", legacy);
    }

    store.remove(legacy)?;
    Ok(())
}
