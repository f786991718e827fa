//! Session configuration resolver
//!
//! Turns a learner-chosen configuration into the concrete ordered case list
//! for one session: filter, uniform shuffle, truncate. Pure apart from the
//! random source; an empty result means "cannot start a quiz" and is the
//! caller's problem to surface.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Case, Catalog};

use super::models::SessionConfig;

/// Whether a case passes the config's subject and skin-tone filters
///
/// Tone-agnostic cases (no Fitzpatrick classification) always pass the tone
/// filter, as does everything when the filter list is empty.
pub fn matches(config: &SessionConfig, case: &Case) -> bool {
    if !config.subjects.contains(&case.subject) {
        return false;
    }
    match case.fitzpatrick {
        None => true,
        Some(fp) => config.fitzpatricks.is_empty() || config.fitzpatricks.contains(&fp),
    }
}

/// Resolve a config against the catalog into an ordered case list
///
/// Returns `min(config.count, |filtered|)` cases in uniformly shuffled
/// order; each call is independent and unseeded.
pub fn generate(config: &SessionConfig, catalog: &Catalog) -> Vec<Case> {
    generate_with_rng(config, catalog, &mut rand::thread_rng())
}

/// [`generate`] with an explicit random source
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &SessionConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<Case> {
    let mut selected: Vec<Case> = catalog
        .cases()
        .iter()
        .filter(|case| matches(config, case))
        .cloned()
        .collect();

    selected.shuffle(rng);
    selected.truncate(config.count);
    selected
}
