//! Console table of written reports and the end-of-run summary.
//!
//! Teacher and subject names are often CJK, so column widths are measured in
//! terminal cells rather than chars.

use super::summary::{ReportEntry, RunCounts};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_COLUMN_WIDTH: usize = 40;

/// Display width of a string in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w <= width {
        return format!("{}{}", s, " ".repeat(width - display_w));
    }

    // Reserve space for "..."
    let target_width = width.saturating_sub(3);
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + c_width > target_width {
            break;
        }
        result.push(c);
        current_width += c_width;
    }
    if width >= 3 {
        result.push_str("...");
        current_width += 3;
    }
    result.push_str(&" ".repeat(width.saturating_sub(current_width)));
    result
}

/// Render the report table as a string (one line per report)
pub fn format_report_table(entries: &[ReportEntry]) -> String {
    let headers = ["Teacher", "Grade", "Subject", "Rows", "File"];
    let cells: Vec<[String; 5]> = entries
        .iter()
        .map(|e| {
            let file = e.path.file_name().map(|f| f.to_string_lossy().into_owned()).unwrap_or_default();
            [e.teacher_name.clone(), e.grade_level.clone(), e.subject_name.clone(), e.rows.to_string(), file]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(display_width(cell)).min(MAX_COLUMN_WIDTH);
        }
    }

    let line = |sep_l: &str, sep_m: &str, sep_r: &str| {
        let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", sep_l, parts.join(sep_m), sep_r)
    };
    let render = |row: &[String]| {
        let parts: Vec<String> =
            row.iter().zip(widths.iter()).map(|(cell, w)| format!(" {} ", truncate_with_padding(cell, *w))).collect();
        format!("│{}│\n", parts.join("│"))
    };

    let mut out = String::new();
    out.push_str(&line("┌", "┬", "┐"));
    out.push_str(&render(&headers.map(String::from)));
    out.push_str(&line("├", "┼", "┤"));
    for row in &cells {
        out.push_str(&render(row));
    }
    out.push_str(&line("└", "┴", "┘"));
    out
}

pub fn print_report_table(entries: &[ReportEntry]) {
    if entries.is_empty() {
        return;
    }
    print!("{}", format_report_table(entries));
}

/// Print the final counts
pub fn print_summary(counts: &RunCounts) {
    println!("\n=== Summary ===");
    println!("Grade rows read:    {} ({} dropped)", counts.grade_rows_read, counts.grade_rows_dropped);
    println!("Teacher rows read:  {} ({} discarded)", counts.teacher_rows_read, counts.teacher_rows_discarded);
    println!("Report groups:      {}", counts.report_groups);
    println!("Unmatched rows:     {}", counts.unmatched_rows);
    println!("Files written:      {} ({} failed)", counts.files_written, counts.write_failures);
    println!("Mail sent:          {} ({} failed)", counts.mail_sent, counts.mail_failed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_with_padding_cjk() {
        // each CJK char is two cells wide
        assert_eq!(truncate_with_padding("王老師", 8), "王老師  ");
        assert_eq!(display_width(&truncate_with_padding("王老師", 8)), 8);
        assert_eq!(truncate_with_padding("abcdefgh", 6), "abc...");
    }

    #[test]
    fn test_report_table_rows_align() {
        let entries = vec![
            ReportEntry {
                teacher_name: "王老師".to_string(),
                grade_level: "7".to_string(),
                subject_code: "MATH".to_string(),
                subject_name: "數學".to_string(),
                rows: 31,
                path: PathBuf::from("output/王老師_年級7_數學.csv"),
            },
            ReportEntry {
                teacher_name: "Mr.Lee".to_string(),
                grade_level: "8".to_string(),
                subject_code: "ENG".to_string(),
                subject_name: "English".to_string(),
                rows: 2,
                path: PathBuf::from("output/Mr.Lee_年級8_English.csv"),
            },
        ];

        let table = format_report_table(&entries);
        let widths: Vec<usize> = table.lines().map(display_width).collect();
        assert_eq!(table.lines().count(), 6);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(table.contains("王老師_年級7_數學.csv"));
    }
}
