//! Local-device persistence
//!
//! Everything durable goes through the [`KeyValueStore`] trait so the session
//! logic can run against an in-memory fake in tests. Keys partition by kind
//! and identity namespace; see [`keys`].

pub mod keys;
pub mod kv;
pub mod migration;
pub mod progress;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use progress::ProgressStore;
