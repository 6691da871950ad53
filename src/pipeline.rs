/// End-to-end run: load -> index -> match -> write -> distribute
///
/// Each phase finishes before the next starts and reports its counts through
/// `ui::status`. Files already written stay on disk if a later phase fails.
use crate::cli::CliArgs;
use crate::distribute;
use crate::error::{ReportError, Result};
use crate::index::TeacherIndex;
use crate::input;
use crate::mail::{self, DeliveryStats, DryRunTransport, MailTransport, OutboxTransport};
use crate::matcher;
use crate::report::{self, ExportOptions, RunCounts, WrittenReports};
use crate::settings;
use crate::types::{GradeRow, ReportKey, TeacherRow, column};
use crate::ui;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Run the whole pipeline for `args` and return the phase counts
pub fn run(args: &CliArgs) -> Result<RunCounts> {
    let mut counts = RunCounts::default();
    let encoding = input::resolve_encoding(args.encoding.as_deref())?;

    // Load
    let sheet = input::read_grade_csv(&args.grades, encoding)?;
    counts.grade_rows_read = sheet.rows.len();
    counts.grade_rows_dropped = sheet.dropped;
    ui::status(&format!(
        "Read {} grade rows from {} ({} columns, {} exam-specific)",
        sheet.rows.len(),
        args.grades.display(),
        sheet.header.len(),
        sheet.header.len().saturating_sub(column::EXTRA_START)
    ));
    if sheet.dropped > 0 {
        ui::warning(&format!("{} grade rows had too few fields and were skipped", sheet.dropped));
    }

    let teacher_list = input::read_teacher_csv(&args.teachers, encoding)?;
    counts.teacher_rows_read = teacher_list.teachers.len();
    counts.teacher_rows_discarded = teacher_list.discarded;
    ui::status(&format!("Read {} teacher rows from {}", teacher_list.teachers.len(), args.teachers.display()));

    // Index and match
    let index = TeacherIndex::build(&teacher_list.teachers);
    debug!("Teacher index holds {} keys", index.len());

    let mut outcome = matcher::match_grades(&sheet.rows, &index);
    counts.report_groups = outcome.buckets.len();
    counts.unmatched_rows = outcome.unmatched.len();
    ui::status(&format!("Matched {} report groups ({} rows)", outcome.buckets.len(), outcome.matched_rows()));

    // Write
    report::ensure_output_dir(&args.output_dir)?;
    let options = ExportOptions { excel_bom: args.excel_bom };

    let unmatched_file = if outcome.unmatched.is_empty() {
        None
    } else {
        ui::warning(&format!("{} grade rows have no matching teacher", outcome.unmatched.len()));
        match report::write_unmatched(&args.output_dir, &sheet.header, &outcome.unmatched, options) {
            Ok(path) => {
                ui::status(&format!("Wrote unmatched rows to {}", path.display()));
                Some(path)
            }
            Err(e) => {
                warn!("Failed to write unmatched rows: {}", e);
                None
            }
        }
    };

    if outcome.buckets.is_empty() {
        return Err(ReportError::NoReports);
    }

    let written = report::write_reports(&args.output_dir, &sheet.header, &mut outcome.buckets, options);
    counts.files_written = written.files.len();
    counts.write_failures = written.failures;
    if written.files.is_empty() {
        return Err(ReportError::NoReports);
    }
    ui::status(&format!("Wrote {} report files to {}", written.files.len(), args.output_dir.display()));

    let entries = report::report_entries(&written, &outcome.buckets);
    report::print_report_table(&entries);

    // Distribute
    let delivery = run_mail_phase(args, &teacher_list.teachers, &written, &outcome.buckets);
    counts.mail_sent = delivery.sent;
    counts.mail_failed = delivery.failed;

    if let Some(ref path) = args.json_summary {
        match report::export_json_summary(
            path,
            &args.grades,
            &args.teachers,
            &counts,
            &entries,
            unmatched_file.as_deref(),
        ) {
            Ok(()) => ui::status(&format!("JSON summary saved to {}", path.display())),
            Err(e) => warn!("Failed to save JSON summary: {}", e),
        }
    }

    Ok(counts)
}

/// Plan and send mail, unless disabled or unconfigured
fn run_mail_phase(
    args: &CliArgs,
    teachers: &[TeacherRow],
    written: &WrittenReports,
    buckets: &BTreeMap<ReportKey, Vec<GradeRow>>,
) -> DeliveryStats {
    if !args.mail_allowed() {
        ui::status("Mail disabled by --no-mail");
        return DeliveryStats::default();
    }

    let settings = match settings::load_settings(&args.settings) {
        Ok(s) => s,
        Err(e) => {
            ui::warning(&format!("Skipping mail: {}", e));
            return DeliveryStats::default();
        }
    };

    if !settings.should_send_email {
        ui::status(&format!("Mail sending is turned off in {}", args.settings.display()));
        return DeliveryStats::default();
    }

    let plan = distribute::plan_distribution(&written.files, buckets, teachers);
    ui::status(&format!("Sending reports to {} teacher(s)", plan.len()));

    let mut transport: Box<dyn MailTransport> = match args.outbox {
        Some(ref dir) => Box::new(OutboxTransport::new(dir)),
        None => Box::new(DryRunTransport),
    };

    let stats = mail::deliver_all(&plan, &settings, teachers, transport.as_mut());
    ui::status(&format!("Mail done: {} sent, {} failed", stats.sent, stats.failed));
    stats
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
