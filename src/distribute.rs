/// Distribution planning: which report files go to which teacher
///
/// Each written report is traced back to a teacher through one of its rows,
/// and its path is filed under that teacher's email address.
use crate::types::{GradeRow, ReportKey, TeacherRow};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Recipient email -> report files to attach
pub type DistributionPlan = BTreeMap<String, Vec<PathBuf>>;

/// Group written report files by teacher email
///
/// The teacher list is scanned linearly; when several teachers share a
/// (subject, grade-level, class) key the last one is used, matching the
/// `TeacherIndex`.
pub fn plan_distribution(
    written: &BTreeMap<ReportKey, PathBuf>,
    buckets: &BTreeMap<ReportKey, Vec<GradeRow>>,
    teachers: &[TeacherRow],
) -> DistributionPlan {
    let mut plan = DistributionPlan::new();

    for (key, path) in written {
        let Some(representative) = buckets.get(key).and_then(|rows| rows.first()) else {
            debug!("Report {} has no rows; not distributed", path.display());
            continue;
        };

        let index_key = representative.index_key();
        match teachers.iter().rev().find(|t| t.index_key() == index_key) {
            Some(teacher) => plan.entry(teacher.email.clone()).or_default().push(path.clone()),
            None => warn!("No teacher found for {} ({}); not distributed", path.display(), index_key),
        }
    }

    plan
}

/// Display name for an email address: the first teacher using it, or the address itself
pub fn teacher_name_by_email<'a>(teachers: &'a [TeacherRow], email: &'a str) -> &'a str {
    teachers.iter().find(|t| t.email == email).map(|t| t.teacher_name.as_str()).unwrap_or(email)
}
