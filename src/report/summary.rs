//! Run statistics and the JSON run summary.

use super::export::WrittenReports;
use crate::error::{ReportError, Result};
use crate::types::{GradeRow, ReportKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Counts collected at each phase boundary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub grade_rows_read: usize,
    pub grade_rows_dropped: usize,
    pub teacher_rows_read: usize,
    pub teacher_rows_discarded: usize,
    pub report_groups: usize,
    pub unmatched_rows: usize,
    pub files_written: usize,
    pub write_failures: usize,
    pub mail_sent: usize,
    pub mail_failed: usize,
}

/// One written report, flattened for display and export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub teacher_name: String,
    pub grade_level: String,
    pub subject_code: String,
    pub subject_name: String,
    pub rows: usize,
    pub path: PathBuf,
}

/// Build display entries for every report that reached disk
pub fn report_entries(written: &WrittenReports, buckets: &BTreeMap<ReportKey, Vec<GradeRow>>) -> Vec<ReportEntry> {
    written
        .files
        .iter()
        .map(|(key, path)| ReportEntry {
            teacher_name: key.teacher_name.clone(),
            grade_level: key.grade_level.clone(),
            subject_code: key.subject_code.clone(),
            subject_name: key.subject_name.clone(),
            rows: buckets.get(key).map(Vec::len).unwrap_or(0),
            path: path.clone(),
        })
        .collect()
}

/// Export the run as pretty-printed JSON.
///
/// # Arguments
/// * `output_path` - Where to write the summary
/// * `grades_path` / `teachers_path` - Inputs of this run
/// * `counts` - Phase counts
/// * `reports` - Written reports
/// * `unmatched_file` - Path of error.csv, if one was written
pub fn export_json_summary(
    output_path: &Path,
    grades_path: &Path,
    teachers_path: &Path,
    counts: &RunCounts,
    reports: &[ReportEntry],
    unmatched_file: Option<&Path>,
) -> Result<()> {
    use serde_json::json;

    let summary = json!({
        "run_at": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "inputs": {
            "grades": grades_path,
            "teachers": teachers_path,
        },
        "counts": counts,
        "reports": reports,
        "unmatched_file": unmatched_file,
    });

    let file = File::create(output_path).map_err(|e| ReportError::io(output_path, e))?;
    serde_json::to_writer_pretty(file, &summary).map_err(|e| ReportError::io(output_path, e.into()))?;

    Ok(())
}
