/// CSV loading for grade and teacher sheets
///
/// This module handles:
/// - Decoding input bytes (UTF-8 by default, any WHATWG label via --encoding)
/// - Reading variable-width grade rows and padding them to the header width
/// - Reading teacher rows and discarding short ones
use crate::error::{ReportError, Result};
use crate::types::{GradeRow, MIN_GRADE_FIELDS, TeacherRow, column};
use encoding_rs::Encoding;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Grade sheet as loaded: header row plus admitted data rows
#[derive(Debug, Clone, Default)]
pub struct GradeSheet {
    /// Header row, reused verbatim for every exported file
    pub header: Vec<String>,
    pub rows: Vec<GradeRow>,
    /// Rows dropped for having fewer than `MIN_GRADE_FIELDS` cells
    pub dropped: usize,
}

/// Teacher assignments as loaded
#[derive(Debug, Clone, Default)]
pub struct TeacherList {
    pub teachers: Vec<TeacherRow>,
    /// Rows with fewer than seven cells, discarded without a warning
    pub discarded: usize,
}

/// Look up an encoding by label; `None` means UTF-8
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        None => Ok(encoding_rs::UTF_8),
        Some(label) => {
            Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| ReportError::Encoding(label.to_string()))
        }
    }
}

/// Read a whole file and decode it. A leading byte-order mark is removed.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ReportError::io(path, e))?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "{} contains bytes that are not valid {}; they were replaced (try --encoding)",
            path.display(),
            used.name()
        );
    }
    Ok(text.into_owned())
}

/// Read the grade CSV at `path`
pub fn read_grade_csv(path: &Path, encoding: &'static Encoding) -> Result<GradeSheet> {
    let content = read_text(path, encoding)?;
    parse_grades(&content).map_err(|e| ReportError::csv(path, e))
}

/// Read the teacher CSV at `path`
pub fn read_teacher_csv(path: &Path, encoding: &'static Encoding) -> Result<TeacherList> {
    let content = read_text(path, encoding)?;
    parse_teachers(&content).map_err(|e| ReportError::csv(path, e))
}

fn reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(content.as_bytes())
}

/// Parse grade CSV text. The first record is the header.
pub fn parse_grades(content: &str) -> std::result::Result<GradeSheet, csv::Error> {
    let mut sheet = GradeSheet::default();
    let mut records = reader(content).into_records();

    match records.next() {
        Some(header) => {
            sheet.header = header?.iter().map(String::from).collect();
        }
        None => return Ok(sheet),
    }

    let width = sheet.header.len();
    debug!(
        "Grade header has {} columns ({} fixed, {} exam-specific)",
        width,
        width.min(column::EXTRA_START),
        width.saturating_sub(column::EXTRA_START)
    );

    for (idx, record) in records.enumerate() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        // Header is line 1, so data index 0 is line 2 unless quoted fields span lines
        let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);

        if record.len() < MIN_GRADE_FIELDS {
            warn!(
                "Grade line {} has {} fields, at least {} are required (through student name); skipped",
                line,
                record.len(),
                MIN_GRADE_FIELDS
            );
            sheet.dropped += 1;
            continue;
        }

        let cells: Vec<String> = record.iter().map(String::from).collect();
        sheet.rows.push(GradeRow::padded(cells, width));
    }

    Ok(sheet)
}

/// Parse teacher CSV text. The first record is a header and is skipped.
pub fn parse_teachers(content: &str) -> std::result::Result<TeacherList, csv::Error> {
    let mut list = TeacherList::default();

    for record in reader(content).into_records().skip(1) {
        let cells: Vec<String> = record?.iter().map(String::from).collect();
        match TeacherRow::from_cells(&cells) {
            Some(teacher) => list.teachers.push(teacher),
            None => list.discarded += 1,
        }
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "科目代號,科目名稱,學號,年級,班級,座號,姓名,組別,選擇,非選擇,補考扣,違規,補考扣分,成績,答案1,答案2";

    #[test]
    fn test_short_grade_rows_are_dropped() {
        let content = format!("{}\nMATH,Math,S1,7,1,1,Alice,,,,,,,90,A,B\nMATH,Math,S2,7,1\n", HEADER);
        let sheet = parse_grades(&content).unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.dropped, 1);
        assert_eq!(sheet.header.len(), 16);
    }

    #[test]
    fn test_grade_rows_padded_to_header_width() {
        let content = format!("{}\nMATH,Math,S1,7,1,1,Alice\n", HEADER);
        let sheet = parse_grades(&content).unwrap();
        assert_eq!(sheet.rows[0].len(), 16);
        assert_eq!(sheet.rows[0].student_name(), "Alice");
        assert_eq!(sheet.rows[0].score(), "");
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let content = format!("{}\n\nMATH,Math,S1,7,1,1,Alice\n\n", HEADER);
        let sheet = parse_grades(&content).unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.dropped, 0);
    }

    #[test]
    fn test_empty_grade_file_has_no_header() {
        let sheet = parse_grades("").unwrap();
        assert!(sheet.header.is_empty());
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn test_teacher_header_skipped_and_short_rows_discarded() {
        let content = "科目代號,科目名稱,年級,班級,組別,老師,email\n\
                       MATH,Math,7,1,,Mr.Lee,lee@x.org\n\
                       ENG,English,7,1,,Ms.Wu\n";
        let list = parse_teachers(content).unwrap();
        assert_eq!(list.teachers.len(), 1);
        assert_eq!(list.discarded, 1);
        assert_eq!(list.teachers[0].teacher_name, "Mr.Lee");
    }

    #[test]
    fn test_read_text_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBFa,b\n").unwrap();
        let text = read_text(file.path(), encoding_rs::UTF_8).unwrap();
        assert_eq!(text, "a,b\n");
    }

    #[test]
    fn test_read_text_with_big5() {
        let (encoded, _, _) = encoding_rs::BIG5.encode("王老師");
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&encoded).unwrap();

        let encoding = resolve_encoding(Some("big5")).unwrap();
        assert_eq!(read_text(file.path(), encoding).unwrap(), "王老師");
    }

    #[test]
    fn test_unknown_encoding_label() {
        assert!(matches!(resolve_encoding(Some("klingon")), Err(ReportError::Encoding(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_grade_csv(Path::new("does/not/exist.csv"), encoding_rs::UTF_8);
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
