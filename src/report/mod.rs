//! Report generation module.
//!
//! This module handles:
//! - Ordering rows inside a report (class, then seat number)
//! - Writing one CSV per report bucket, plus the unmatched-row export
//! - Run counts and the JSON run summary
//! - The console table of written reports
//!
//! # Module Organization
//!
//! - `sort` - Row ordering policy
//! - `export` - CSV export and file naming
//! - `summary` - RunCounts, ReportEntry, JSON summary
//! - `table` - Console rendering

mod export;
mod sort;
mod summary;
mod table;

pub use export::{
    ExportOptions, UNMATCHED_FILE_NAME, WrittenReports, assign_file_names, ensure_output_dir, report_file_name,
    write_csv, write_reports, write_unmatched,
};

pub use sort::{compare_seat, sort_report_rows};

pub use summary::{ReportEntry, RunCounts, export_json_summary, report_entries};

pub use table::{format_report_table, print_report_table, print_summary};
