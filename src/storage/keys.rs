//! Storage key scheme
//!
//! Every persisted record lives under `learndx:{kind}:{namespace}` where the
//! namespace comes from [`crate::identity::Identity::namespace`]. The two
//! legacy keys predate namespacing and exist only as migration input.

/// Pre-namespacing attempt log key
pub const LEGACY_ATTEMPTS_KEY: &str = "learndx:questionAttempts";

/// Pre-namespacing result log key
pub const LEGACY_RESULTS_KEY: &str = "learndx:quizHistory";

/// Marker written once the legacy keys have been migrated
pub const MIGRATION_MARKER_KEY: &str = "learndx:migrated:v2";

/// Single-slot resume snapshot for a namespace
pub fn progress_key(namespace: &str) -> String {
    format!("learndx:progress:{}", namespace)
}

/// Chronological attempt log for a namespace
pub fn attempts_key(namespace: &str) -> String {
    format!("learndx:attempts:{}", namespace)
}

/// Newest-first result log for a namespace
pub fn results_key(namespace: &str) -> String {
    format!("learndx:results:{}", namespace)
}
