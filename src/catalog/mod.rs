//! Case catalog: models, loading, and validation
//!
//! The catalog is the immutable source of quiz content. Sessions only ever
//! filter and sample it; they never mutate it.

pub mod load;
pub mod models;

pub use load::{Catalog, CatalogError};
pub use models::{Case, Fitzpatrick, SkinToneNotes, Subject, FALLBACK_EXPLANATION};
