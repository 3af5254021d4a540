// Selection module
// Snapshot of the user's current selection on the roster grid

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::cell::{DateCell, DateRange};
use crate::models::subject::Subject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionKind {
    /// Nothing selected
    #[default]
    None,
    /// One click made, waiting for the second
    PendingStart,
    /// Two clicks on the same row made
    Range,
    /// A whole subject selected
    Row,
}

/// The evolving or finalized selection.
///
/// Invariants kept by the selection machine:
/// - every cell belongs to `subject`
/// - `start <= end` once both are set
/// - `kind == None` implies no subject and no cells
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub kind: SelectionKind,
    pub subject: Option<Subject>,
    pub start: Option<NaiveDate>,
    /// `None` while the selection is pending
    pub end: Option<NaiveDate>,
    pub cells: Vec<DateCell>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn pending(subject: Subject, date: NaiveDate) -> Self {
        let cell = DateCell::new(subject.id, date);
        Self {
            kind: SelectionKind::PendingStart,
            subject: Some(subject),
            start: Some(date),
            end: None,
            cells: vec![cell],
        }
    }

    pub(crate) fn range(subject: Subject, range: DateRange) -> Self {
        let cells = range.cells_for(subject.id);
        Self {
            kind: SelectionKind::Range,
            subject: Some(subject),
            start: Some(range.start()),
            end: Some(range.end()),
            cells,
        }
    }

    pub(crate) fn row(subject: Subject) -> Self {
        Self {
            kind: SelectionKind::Row,
            subject: Some(subject),
            start: None,
            end: None,
            cells: Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == SelectionKind::None
    }

    /// Dates covered by a date selection.
    ///
    /// A pending selection covers its single start day. Row selections cover no dates.
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.kind, self.start, self.end) {
            (SelectionKind::PendingStart, Some(start), _) => Some(DateRange::single(start)),
            (SelectionKind::Range, Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }

    pub fn contains(&self, cell: &DateCell) -> bool {
        self.cells.contains(cell)
    }

    pub fn subject_id(&self) -> Option<i64> {
        self.subject.as_ref().map(|subject| subject.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn anna() -> Subject {
        Subject::new(1, "anna", "Anna de Vries")
    }

    #[test]
    fn test_none_is_empty() {
        let selection = Selection::none();

        assert!(selection.is_none());
        assert!(selection.subject.is_none());
        assert!(selection.cells.is_empty());
        assert_eq!(selection.date_range(), None);
    }

    #[test]
    fn test_pending_covers_single_day() {
        let selection = Selection::pending(anna(), day(10));

        assert_eq!(selection.end, None);
        assert_eq!(selection.date_range(), Some(DateRange::single(day(10))));
        assert!(selection.contains(&DateCell::new(1, day(10))));
    }

    #[test]
    fn test_range_materializes_cells() {
        let selection = Selection::range(anna(), DateRange::new(day(5), day(3)));

        assert_eq!(selection.start, Some(day(3)));
        assert_eq!(selection.end, Some(day(5)));
        assert_eq!(selection.cells.len(), 3);
        assert!(!selection.contains(&DateCell::new(2, day(4))));
    }

    #[test]
    fn test_row_has_no_dates() {
        let selection = Selection::row(anna());

        assert_eq!(selection.subject_id(), Some(1));
        assert!(selection.cells.is_empty());
        assert_eq!(selection.date_range(), None);
    }
}
