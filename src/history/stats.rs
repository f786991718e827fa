//! Performance aggregates over the attempt log

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Subject;
use crate::quiz::models::Attempt;

/// Overall answered/correct tallies
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub answered: usize,
    pub correct: usize,
}

impl PerformanceStats {
    /// Accuracy as a rounded whole percent; 0 when nothing was answered
    pub fn accuracy_percent(&self) -> u32 {
        if self.answered == 0 {
            return 0;
        }
        ((self.correct as f64 / self.answered as f64) * 100.0).round() as u32
    }
}

/// Tallies for one subject
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub subject: Subject,
    pub stats: PerformanceStats,
}

/// Tallies for one tag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStats {
    pub tag: String,
    pub stats: PerformanceStats,
}

/// Overall tallies across all attempts
pub fn overall(attempts: &[Attempt]) -> PerformanceStats {
    let mut stats = PerformanceStats::default();
    for attempt in attempts {
        stats.answered += 1;
        if attempt.was_correct {
            stats.correct += 1;
        }
    }
    stats
}

/// Per-subject tallies, in subject display order
pub fn by_subject(attempts: &[Attempt]) -> Vec<SubjectStats> {
    Subject::ALL
        .into_iter()
        .filter_map(|subject| {
            let subset: Vec<Attempt> = attempts
                .iter()
                .filter(|a| a.subject == subject)
                .cloned()
                .collect();
            if subset.is_empty() {
                None
            } else {
                Some(SubjectStats {
                    subject,
                    stats: overall(&subset),
                })
            }
        })
        .collect()
}

/// Per-tag tallies, alphabetical
pub fn by_tag(attempts: &[Attempt]) -> Vec<TagStats> {
    let mut buckets: BTreeMap<String, PerformanceStats> = BTreeMap::new();
    for attempt in attempts {
        for tag in &attempt.tags {
            let stats = buckets.entry(tag.clone()).or_default();
            stats.answered += 1;
            if attempt.was_correct {
                stats.correct += 1;
            }
        }
    }
    buckets
        .into_iter()
        .map(|(tag, stats)| TagStats { tag, stats })
        .collect()
}
