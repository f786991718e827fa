//! Catalog loading and validation
//!
//! A catalog is an immutable list of cases. Loading validates the per-case
//! invariants (unique ids, non-empty duplicate-free options, correct answer
//! among the options) and totalizes the explanation map so every option
//! resolves to some text.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::models::{Case, FALLBACK_EXPLANATION};

/// Case catalog compiled into the binary
const BUILTIN_CASES: &str = include_str!("../../data/cases.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate case id: {0}")]
    DuplicateId(String),

    #[error("case {0}: option list is empty")]
    NoOptions(String),

    #[error("case {0}: duplicate option '{1}'")]
    DuplicateOption(String, String),

    #[error("case {0}: correct answer '{1}' is not among the options")]
    CorrectAnswerNotAnOption(String, String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Immutable, validated case catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    cases: Vec<Case>,
}

impl Catalog {
    /// Build a catalog from cases, validating invariants and filling in
    /// missing explanations
    pub fn from_cases(mut cases: Vec<Case>) -> Result<Self> {
        let mut seen_ids = HashSet::new();
        for case in &mut cases {
            if !seen_ids.insert(case.id.clone()) {
                return Err(CatalogError::DuplicateId(case.id.clone()));
            }
            validate_options(case)?;

            // Every option gets some explanation text
            for option in &case.options {
                case.explanations
                    .entry(option.clone())
                    .or_insert_with(|| FALLBACK_EXPLANATION.to_string());
            }
        }

        Ok(Self { cases })
    }

    /// Parse and validate a catalog from a JSON array of cases
    pub fn from_json(json: &str) -> Result<Self> {
        let cases: Vec<Case> = serde_json::from_str(json)?;
        Self::from_cases(cases)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CASES).expect("embedded case catalog is valid")
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Look up a case by identifier
    pub fn get(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

fn validate_options(case: &Case) -> Result<()> {
    if case.options.is_empty() {
        return Err(CatalogError::NoOptions(case.id.clone()));
    }

    let mut seen = HashSet::new();
    for option in &case.options {
        if !seen.insert(option.as_str()) {
            return Err(CatalogError::DuplicateOption(
                case.id.clone(),
                option.clone(),
            ));
        }
    }

    if !case.has_option(&case.correct_answer) {
        return Err(CatalogError::CorrectAnswerNotAnOption(
            case.id.clone(),
            case.correct_answer.clone(),
        ));
    }

    Ok(())
}
