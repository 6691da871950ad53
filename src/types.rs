/// Core record types for grade and teacher data
///
/// This module defines the typed views over raw CSV rows used throughout
/// grade-report: grade rows, teacher rows, and the two composite keys the
/// matcher joins and groups on.

/// Fixed grade-sheet column positions. Everything from `EXTRA_START` on is
/// exam-specific (answer columns) and carried through untouched.
pub mod column {
    pub const SUBJECT_CODE: usize = 0;
    pub const SUBJECT_NAME: usize = 1;
    pub const STUDENT_ID: usize = 2;
    pub const GRADE_LEVEL: usize = 3;
    pub const CLASS: usize = 4;
    pub const SEAT_NUMBER: usize = 5;
    pub const STUDENT_NAME: usize = 6;
    pub const GROUP: usize = 7;
    pub const CHOICE: usize = 8;
    pub const NON_CHOICE: usize = 9;
    pub const MAKEUP_DEDUCT: usize = 10;
    pub const VIOLATION: usize = 11;
    pub const MAKEUP_DEDUCT_SCORE: usize = 12;
    pub const SCORE: usize = 13;
    pub const EXTRA_START: usize = 14;
}

/// A grade row must reach the student name column to be admitted
pub const MIN_GRADE_FIELDS: usize = column::STUDENT_NAME + 1;

/// Teacher rows carry exactly seven meaningful columns
pub const TEACHER_FIELDS: usize = 7;

/// One student's grade line, stored verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRow {
    cells: Vec<String>,
}

impl GradeRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Build a row from a raw record, padding it to `width` with empty cells
    pub fn padded(mut cells: Vec<String>, width: usize) -> Self {
        if cells.len() < width {
            cells.resize(width, String::new());
        }
        Self { cells }
    }

    /// Raw cells exactly as read (untrimmed), used for export
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Trimmed cell at `index`, or "" when the row is shorter
    pub fn field(&self, index: usize) -> &str {
        self.cells.get(index).map(|s| s.trim()).unwrap_or("")
    }

    pub fn subject_code(&self) -> &str {
        self.field(column::SUBJECT_CODE)
    }

    pub fn subject_name(&self) -> &str {
        self.field(column::SUBJECT_NAME)
    }

    pub fn student_id(&self) -> &str {
        self.field(column::STUDENT_ID)
    }

    pub fn grade_level(&self) -> &str {
        self.field(column::GRADE_LEVEL)
    }

    pub fn class(&self) -> &str {
        self.field(column::CLASS)
    }

    pub fn seat_number(&self) -> &str {
        self.field(column::SEAT_NUMBER)
    }

    pub fn student_name(&self) -> &str {
        self.field(column::STUDENT_NAME)
    }

    /// Collected but not used for matching (see `index_key`)
    pub fn group(&self) -> &str {
        self.field(column::GROUP)
    }

    pub fn choice(&self) -> &str {
        self.field(column::CHOICE)
    }

    pub fn non_choice(&self) -> &str {
        self.field(column::NON_CHOICE)
    }

    pub fn makeup_deduct(&self) -> &str {
        self.field(column::MAKEUP_DEDUCT)
    }

    pub fn violation(&self) -> &str {
        self.field(column::VIOLATION)
    }

    pub fn makeup_deduct_score(&self) -> &str {
        self.field(column::MAKEUP_DEDUCT_SCORE)
    }

    pub fn score(&self) -> &str {
        self.field(column::SCORE)
    }

    /// Exam-specific trailing cells, order preserved
    pub fn extra(&self) -> &[String] {
        self.cells.get(column::EXTRA_START..).unwrap_or(&[])
    }

    /// Key used to find the responsible teacher. Group is ignored.
    pub fn index_key(&self) -> TeacherIndexKey {
        TeacherIndexKey::new(self.subject_code(), self.grade_level(), self.class())
    }
}

/// One teacher assignment line, all fields trimmed
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TeacherRow {
    pub subject_code: String,
    pub subject_name: String,
    pub grade_level: String,
    pub class: String,
    pub group: String,
    pub teacher_name: String,
    pub email: String,
}

impl TeacherRow {
    /// Parse a raw record; `None` when it has fewer than seven cells
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        if cells.len() < TEACHER_FIELDS {
            return None;
        }
        let get = |i: usize| cells[i].trim().to_string();
        Some(Self {
            subject_code: get(0),
            subject_name: get(1),
            grade_level: get(2),
            class: get(3),
            group: get(4),
            teacher_name: get(5),
            email: get(6),
        })
    }

    pub fn index_key(&self) -> TeacherIndexKey {
        TeacherIndexKey::new(&self.subject_code, &self.grade_level, &self.class)
    }
}

/// (subject code, grade-level, class) - resolves a grade row to its teacher
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeacherIndexKey {
    pub subject_code: String,
    pub grade_level: String,
    pub class: String,
}

impl TeacherIndexKey {
    pub fn new(subject_code: &str, grade_level: &str, class: &str) -> Self {
        Self {
            subject_code: subject_code.to_string(),
            grade_level: grade_level.to_string(),
            class: class.to_string(),
        }
    }
}

impl std::fmt::Display for TeacherIndexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.subject_code, self.grade_level, self.class)
    }
}

/// Identity of one exported report file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ReportKey {
    pub teacher_name: String,
    pub grade_level: String,
    pub subject_code: String,
    pub subject_name: String,
}

impl ReportKey {
    /// Key for `row` once it has been matched to `teacher`
    pub fn for_match(teacher: &TeacherRow, row: &GradeRow) -> Self {
        Self {
            teacher_name: teacher.teacher_name.clone(),
            grade_level: row.grade_level().to_string(),
            subject_code: row.subject_code().to_string(),
            subject_name: row.subject_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accessors_trim_and_default_to_empty() {
        let row = GradeRow::new(cells(&[" MATH ", "Math", "S1", "7 ", " 1", "3", "Alice"]));
        assert_eq!(row.subject_code(), "MATH");
        assert_eq!(row.grade_level(), "7");
        assert_eq!(row.class(), "1");
        assert_eq!(row.student_name(), "Alice");
        assert_eq!(row.group(), "");
        assert_eq!(row.score(), "");
        assert!(row.extra().is_empty());
        // raw cells stay untouched
        assert_eq!(row.cells()[0], " MATH ");
    }

    #[test]
    fn test_padded_row_reaches_header_width() {
        let row = GradeRow::padded(cells(&["A", "B", "C", "D", "E", "F", "G"]), 16);
        assert_eq!(row.len(), 16);
        assert_eq!(row.cells()[15], "");
        assert_eq!(row.extra().len(), 2);
    }

    #[test]
    fn test_padded_keeps_longer_rows() {
        let row = GradeRow::padded(cells(&["A", "B", "C", "D", "E", "F", "G", "H"]), 7);
        assert_eq!(row.len(), 8);
    }

    #[test]
    fn test_extra_columns_preserve_order() {
        let mut values = vec!["x"; 14];
        values.extend(["A", "C", "B"]);
        let row = GradeRow::new(cells(&values));
        assert_eq!(row.extra(), &["A".to_string(), "C".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_index_key_ignores_group() {
        let a = GradeRow::new(cells(&["MATH", "Math", "S1", "7", "1", "1", "Alice", "A"]));
        let b = GradeRow::new(cells(&["MATH", "Math", "S2", "7", "1", "2", "Bob", "B"]));
        assert_eq!(a.index_key(), b.index_key());
    }

    #[test]
    fn test_teacher_row_requires_seven_cells() {
        assert!(TeacherRow::from_cells(&cells(&["MATH", "Math", "7", "1", "", "Mr.Lee"])).is_none());

        let teacher = TeacherRow::from_cells(&cells(&["MATH ", "Math", " 7", "1", "", " Mr.Lee", "lee@x.org "]))
            .expect("seven cells should parse");
        assert_eq!(teacher.teacher_name, "Mr.Lee");
        assert_eq!(teacher.email, "lee@x.org");
        assert_eq!(teacher.index_key(), TeacherIndexKey::new("MATH", "7", "1"));
    }
}
