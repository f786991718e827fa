//! Learner identity and storage namespace selection
//!
//! Identity is an opaque value supplied by whatever signed the learner in;
//! this crate only uses it to partition stored data. No identity is a valid
//! state and maps to the shared anonymous namespace.

use serde::{Deserialize, Serialize};

/// Namespace sentinel used when no identity is present
pub const ANONYMOUS_NAMESPACE: &str = "anonymous";

/// Who the stored data belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Identity {
    Anonymous,
    User { id: String },
}

impl Identity {
    /// Build an identity from an optional opaque user id
    pub fn from_user_id(id: Option<String>) -> Self {
        match id {
            Some(id) if !id.is_empty() => Identity::User { id },
            _ => Identity::Anonymous,
        }
    }

    /// The storage namespace this identity's data lives under
    pub fn namespace(&self) -> &str {
        match self {
            Identity::Anonymous => ANONYMOUS_NAMESPACE,
            Identity::User { id } => id,
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Identity::Anonymous
    }
}
