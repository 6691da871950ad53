//! Row ordering inside one report: class, then seat number.
//!
//! Seat numbers are usually plain integers but stray labels ("12a", "轉入")
//! turn up. `compare_seat` is the pairwise rule. Sorting goes through
//! `SeatKey`, a total order that agrees with `compare_seat` whenever both
//! seats are numeric or both are labels; numeric seats come before labels.

use crate::types::GradeRow;
use std::cmp::Ordering;

/// Compare two seat numbers: numerically when both parse, else as text
pub fn compare_seat(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SeatKey<'a> {
    Number(i64),
    Label(&'a str),
}

impl<'a> SeatKey<'a> {
    fn of(seat: &'a str) -> Self {
        match seat.parse::<i64>() {
            Ok(n) => SeatKey::Number(n),
            Err(_) => SeatKey::Label(seat),
        }
    }
}

/// Sort rows by class (as text) and then seat number
pub fn sort_report_rows(rows: &mut [GradeRow]) {
    rows.sort_by(|a, b| {
        a.class().cmp(b.class()).then_with(|| SeatKey::of(a.seat_number()).cmp(&SeatKey::of(b.seat_number())))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(class: &str, seat: &str, name: &str) -> GradeRow {
        let cells = ["MATH", "Math", "S", "7", class, seat, name];
        GradeRow::new(cells.iter().map(|s| s.to_string()).collect())
    }

    fn names(rows: &[GradeRow]) -> Vec<&str> {
        rows.iter().map(|r| r.student_name()).collect()
    }

    #[test]
    fn test_compare_seat_numeric_and_text() {
        assert_eq!(compare_seat("2", "10"), Ordering::Less);
        assert_eq!(compare_seat("10", "10"), Ordering::Equal);
        assert_eq!(compare_seat("b", "a"), Ordering::Greater);
        // one side non-numeric falls back to text comparison
        assert_eq!(compare_seat("10", "9a"), Ordering::Less);
    }

    #[test]
    fn test_sort_class_then_numeric_seat() {
        let mut rows = vec![
            row("2", "1", "D"),
            row("1", "10", "C"),
            row("1", "2", "B"),
            row("1", "1", "A"),
        ];
        sort_report_rows(&mut rows);
        assert_eq!(names(&rows), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_class_compares_as_text() {
        let mut rows = vec![row("2", "1", "two"), row("10", "1", "ten")];
        sort_report_rows(&mut rows);
        assert_eq!(names(&rows), vec!["ten", "two"]);
    }

    #[test]
    fn test_labels_after_numbers_without_panicking() {
        // "2" < "10" numerically, "10" < "1a" < "2" as text: no consistent pairwise order exists
        let mut rows = vec![row("1", "1a", "label"), row("1", "10", "ten"), row("1", "2", "two")];
        sort_report_rows(&mut rows);
        assert_eq!(names(&rows), vec!["two", "ten", "label"]);
    }

    #[test]
    fn test_sorted_rows_are_non_decreasing() {
        let mut rows: Vec<GradeRow> = (0..40)
            .map(|i| row(&((i * 7) % 3).to_string(), &((i * 13) % 17).to_string(), "x"))
            .collect();
        sort_report_rows(&mut rows);
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.class() <= b.class());
            if a.class() == b.class() {
                assert_ne!(compare_seat(a.seat_number(), b.seat_number()), Ordering::Greater);
            }
        }
    }
}
