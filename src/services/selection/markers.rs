//! Bookkeeping for the visual markers the engine has handed to the host.

use std::collections::BTreeSet;

use crate::models::marker::{CellMarker, MarkerDiff, MarkerTarget};
use crate::models::selection::{Selection, SelectionKind};

/// Markers currently applied on the grid.
#[derive(Debug, Default)]
pub struct MarkerBoard {
    applied: BTreeSet<(MarkerTarget, CellMarker)>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every applied marker with the markers for `selection`.
    ///
    /// All previously applied markers are reported as removed before the new ones
    /// are reported as added.
    pub fn show(&mut self, selection: &Selection) -> MarkerDiff {
        let next = markers_for(selection);
        let removed = std::mem::take(&mut self.applied).into_iter().collect();
        let added = next.iter().copied().collect();
        self.applied = next;
        MarkerDiff { removed, added }
    }

    /// Remove every applied marker.
    pub fn clear(&mut self) -> MarkerDiff {
        MarkerDiff {
            removed: std::mem::take(&mut self.applied).into_iter().collect(),
            added: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn markers_on(&self, target: MarkerTarget) -> Vec<CellMarker> {
        self.applied
            .iter()
            .filter(|(applied_target, _)| *applied_target == target)
            .map(|(_, marker)| *marker)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(MarkerTarget, CellMarker)> {
        self.applied.iter()
    }
}

fn markers_for(selection: &Selection) -> BTreeSet<(MarkerTarget, CellMarker)> {
    let mut markers = BTreeSet::new();

    match selection.kind {
        SelectionKind::None => {}
        SelectionKind::PendingStart => {
            for cell in &selection.cells {
                markers.insert((MarkerTarget::from(*cell), CellMarker::StartOnly));
            }
        }
        SelectionKind::Range => {
            for cell in &selection.cells {
                markers.insert((MarkerTarget::from(*cell), CellMarker::InRange));
            }
            if let Some(first) = selection.cells.first() {
                markers.insert((MarkerTarget::from(*first), CellMarker::RangeStart));
            }
            if let Some(last) = selection.cells.last() {
                markers.insert((MarkerTarget::from(*last), CellMarker::RangeEnd));
            }
        }
        SelectionKind::Row => {
            if let Some(subject_id) = selection.subject_id() {
                markers.insert((MarkerTarget::Row { subject_id }, CellMarker::RowSelected));
            }
        }
    }

    markers
}
