/// Grade-to-teacher matching and report grouping
///
/// Each grade row is resolved to a teacher through the `TeacherIndex` and
/// appended to the bucket for (teacher, grade-level, subject). Rows without a
/// teacher are collected separately so they can be exported for review.
use crate::index::TeacherIndex;
use crate::types::{GradeRow, ReportKey};
use log::debug;
use std::collections::BTreeMap;

/// Result of matching one batch of grade rows
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Report buckets; rows keep their input order within a bucket
    pub buckets: BTreeMap<ReportKey, Vec<GradeRow>>,
    /// Rows with no teacher for their (subject, grade-level, class)
    pub unmatched: Vec<GradeRow>,
}

impl MatchOutcome {
    pub fn matched_rows(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Match every grade row against the index
pub fn match_grades(rows: &[GradeRow], index: &TeacherIndex) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for row in rows {
        let key = row.index_key();
        match index.get(&key) {
            Some(teacher) => {
                outcome.buckets.entry(ReportKey::for_match(teacher, row)).or_default().push(row.clone());
            }
            None => {
                debug!("No teacher for {} (student {} {})", key, row.student_id(), row.student_name());
                outcome.unmatched.push(row.clone());
            }
        }
    }

    outcome
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod matcher_test;
