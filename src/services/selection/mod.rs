//! Selection state machine for the roster grid.
//!
//! Tracks a single-subject selection across click gestures:
//! `none -> pending-start -> range`, with a separate row-selection path and an
//! explicit clear. Every transition returns the marker changes for the host.

mod markers;

pub use markers::MarkerBoard;

use chrono::NaiveDate;

use crate::models::cell::{DateCell, DateRange};
use crate::models::marker::MarkerDiff;
use crate::models::selection::{Selection, SelectionKind};
use crate::models::subject::Subject;

#[derive(Debug, Default)]
pub struct SelectionMachine {
    selection: Selection,
    markers: MarkerBoard,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current selection; callers never see the live value.
    pub fn snapshot(&self) -> Selection {
        self.selection.clone()
    }

    pub(crate) fn current(&self) -> &Selection {
        &self.selection
    }

    pub fn kind(&self) -> SelectionKind {
        self.selection.kind
    }

    pub fn markers(&self) -> &MarkerBoard {
        &self.markers
    }

    /// Primary click on a date cell of `subject`'s row.
    pub fn primary_select(&mut self, subject: &Subject, date: NaiveDate) -> MarkerDiff {
        match self.selection.kind {
            SelectionKind::PendingStart => self.complete_range(subject, date),
            SelectionKind::None | SelectionKind::Range | SelectionKind::Row => {
                self.start_pending(subject, date)
            }
        }
    }

    /// Select a whole subject, dropping any date selection.
    pub fn row_select(&mut self, subject: &Subject) -> MarkerDiff {
        log::debug!("Row selected: {} ({})", subject.display_name, subject.id);
        self.selection = Selection::row(subject.clone());
        self.markers.show(&self.selection)
    }

    /// Return to an empty selection. Safe to call repeatedly.
    pub fn clear(&mut self) -> MarkerDiff {
        if !self.selection.is_none() {
            log::debug!("Selection cleared");
        }
        self.selection = Selection::none();
        self.markers.clear()
    }

    fn start_pending(&mut self, subject: &Subject, date: NaiveDate) -> MarkerDiff {
        log::debug!("Selection started at {} for subject {}", date, subject.id);
        self.selection = Selection::pending(subject.clone(), date);
        self.markers.show(&self.selection)
    }

    fn complete_range(&mut self, subject: &Subject, date: NaiveDate) -> MarkerDiff {
        let anchor = match (self.selection.subject_id(), self.selection.start) {
            (Some(subject_id), Some(start)) => DateCell::new(subject_id, start),
            _ => return self.start_pending(subject, date),
        };
        let clicked = DateCell::new(subject.id, date);

        if let Err(err) = anchor.try_cmp(&clicked) {
            log::info!("Restarting selection: {}", err);
            return self.start_pending(subject, date);
        }

        let range = DateRange::new(anchor.date, clicked.date);
        let owner = self
            .selection
            .subject
            .clone()
            .unwrap_or_else(|| subject.clone());
        log::debug!(
            "Selection range {}..={} ({} days) for subject {}",
            range.start(),
            range.end(),
            range.len_days(),
            owner.id
        );
        self.selection = Selection::range(owner, range);
        self.markers.show(&self.selection)
    }
}
