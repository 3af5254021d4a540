// Cell module
// Selectable date cells and inclusive date ranges

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::utils::date::days_inclusive;

/// One selectable day in one subject's row.
///
/// Cells only order against cells of the same row: `partial_cmp` returns `None`
/// across subjects and [`DateCell::try_cmp`] reports the mismatch as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateCell {
    pub date: NaiveDate,
    pub subject_id: i64,
}

impl DateCell {
    pub fn new(subject_id: i64, date: NaiveDate) -> Self {
        Self { date, subject_id }
    }

    pub fn same_row(&self, other: &DateCell) -> bool {
        self.subject_id == other.subject_id
    }

    /// Compare two cells, rejecting cells from different rows.
    pub fn try_cmp(&self, other: &DateCell) -> Result<Ordering, EngineError> {
        self.partial_cmp(other)
            .ok_or(EngineError::InvalidSelectionSpan {
                from_subject: self.subject_id,
                from: self.date,
                to_subject: other.subject_id,
                to: other.date,
            })
    }
}

impl PartialOrd for DateCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_row(other) {
            Some(self.date.cmp(&other.date))
        } else {
            None
        }
    }
}

/// Closed date interval; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Wire form of [`DateRange`]; reordered on the way in.
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range from two dates in any order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_inclusive(self.start, self.end)
    }

    /// Materialize the range as cells of one subject's row.
    pub fn cells_for(&self, subject_id: i64) -> Vec<DateCell> {
        self.days()
            .map(|date| DateCell::new(subject_id, date))
            .collect()
    }
}
