//! Report export to CSV files.
//!
//! This module handles writing one CSV per report bucket and the auxiliary
//! file of unmatched grade rows. Every file starts with the grade sheet's
//! header, passed in by the caller.

use super::sort::sort_report_rows;
use crate::error::{ReportError, Result};
use crate::types::{GradeRow, ReportKey};
use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name for grade rows that found no teacher
pub const UNMATCHED_FILE_NAME: &str = "error.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options shared by every exported CSV
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Prefix files with a UTF-8 byte-order mark (helps spreadsheet programs)
    pub excel_bom: bool,
}

/// Outcome of writing all report buckets
#[derive(Debug, Default)]
pub struct WrittenReports {
    /// Reports that reached disk, by key
    pub files: BTreeMap<ReportKey, PathBuf>,
    /// Reports skipped because writing failed
    pub failures: usize,
}

/// Replace characters that are not allowed in file names
fn sanitize_component(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Base file name for a report: `{teacher}_年級{grade}_{subject}.csv`
pub fn report_file_name(key: &ReportKey) -> String {
    format!(
        "{}_年級{}_{}.csv",
        sanitize_component(&key.teacher_name),
        sanitize_component(&key.grade_level),
        sanitize_component(&key.subject_name)
    )
}

/// Assign a unique file name to every key.
///
/// Keys are visited in order; a key whose base name is already taken gets its
/// subject code appended, then a counter if that is taken too. Names are
/// compared case-insensitively so case-folding file systems keep every report.
pub fn assign_file_names<'a>(keys: impl IntoIterator<Item = &'a ReportKey>) -> BTreeMap<ReportKey, String> {
    let mut used = HashSet::new();
    let mut names = BTreeMap::new();

    for key in keys {
        let base = report_file_name(key);
        let stem = base.trim_end_matches(".csv").to_string();

        let mut name = base;
        if used.contains(&name.to_lowercase()) {
            name = format!("{}_{}.csv", stem, sanitize_component(&key.subject_code));
        }
        let mut n = 2;
        while used.contains(&name.to_lowercase()) {
            name = format!("{}_{}_{}.csv", stem, sanitize_component(&key.subject_code), n);
            n += 1;
        }

        used.insert(name.to_lowercase());
        names.insert(key.clone(), name);
    }

    names
}

/// Write `header` and `rows` to `path` as CSV, preserving every cell verbatim
pub fn write_csv<'a>(
    path: &Path,
    header: &[String],
    rows: impl IntoIterator<Item = &'a GradeRow>,
    options: ExportOptions,
) -> Result<()> {
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    if options.excel_bom {
        out.write_all(UTF8_BOM).map_err(|e| ReportError::io(path, e))?;
    }

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record(header).map_err(|e| ReportError::csv(path, e))?;
    for row in rows {
        writer.write_record(row.cells()).map_err(|e| ReportError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;

    Ok(())
}

/// Create the output directory if needed
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))
}

/// Sort and write every bucket to its own file under `output_dir`.
///
/// A bucket that fails to write is logged and skipped; the rest still go out.
pub fn write_reports(
    output_dir: &Path,
    header: &[String],
    buckets: &mut BTreeMap<ReportKey, Vec<GradeRow>>,
    options: ExportOptions,
) -> WrittenReports {
    let names = assign_file_names(buckets.keys());
    let mut written = WrittenReports::default();

    for (key, rows) in buckets.iter_mut() {
        sort_report_rows(rows);

        let path = output_dir.join(&names[key]);
        match write_csv(&path, header, rows.iter(), options) {
            Ok(()) => {
                debug!("Wrote {} ({} rows)", path.display(), rows.len());
                written.files.insert(key.clone(), path);
            }
            Err(e) => {
                warn!("Failed to write report for {} grade {} {}: {}", key.teacher_name, key.grade_level, key.subject_name, e);
                written.failures += 1;
            }
        }
    }

    written
}

/// Write the unmatched rows to `error.csv`, unchanged and in input order
pub fn write_unmatched(
    output_dir: &Path,
    header: &[String],
    rows: &[GradeRow],
    options: ExportOptions,
) -> Result<PathBuf> {
    let path = output_dir.join(UNMATCHED_FILE_NAME);
    write_csv(&path, header, rows, options)?;
    Ok(path)
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
