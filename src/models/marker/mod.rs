// Marker module
// Visual-state vocabulary the host renders on cells and rows

use serde::{Deserialize, Serialize};

use crate::models::cell::DateCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellMarker {
    StartOnly,
    RangeStart,
    RangeEnd,
    InRange,
    RowSelected,
}

impl CellMarker {
    /// CSS-style class name the host applies
    pub fn class_name(&self) -> &'static str {
        match self {
            CellMarker::StartOnly => "start-only",
            CellMarker::RangeStart => "range-start",
            CellMarker::RangeEnd => "range-end",
            CellMarker::InRange => "in-range",
            CellMarker::RowSelected => "row-selected",
        }
    }
}

/// Where a marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum MarkerTarget {
    Cell { subject_id: i64, date: chrono::NaiveDate },
    Row { subject_id: i64 },
}

impl From<DateCell> for MarkerTarget {
    fn from(cell: DateCell) -> Self {
        MarkerTarget::Cell {
            subject_id: cell.subject_id,
            date: cell.date,
        }
    }
}

/// Marker changes the host has to render, removals first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkerDiff {
    pub removed: Vec<(MarkerTarget, CellMarker)>,
    pub added: Vec<(MarkerTarget, CellMarker)>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}
