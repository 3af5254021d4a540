// Context target module
// What was under the pointer when the context menu was requested

use serde::{Deserialize, Serialize};

use crate::models::cell::DateCell;
use crate::models::event_ref::EventRef;
use crate::models::subject::Subject;

/// Snapshot taken on every right-click and discarded when the menu closes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextTarget {
    pub cell: Option<DateCell>,
    pub row: Option<Subject>,
    pub event: Option<EventRef>,
}

impl ContextTarget {
    /// A right-click on an empty cell of a row.
    pub fn empty_cell(row: Subject, cell: DateCell) -> Self {
        Self {
            cell: Some(cell),
            row: Some(row),
            event: None,
        }
    }

    /// A right-click on an existing event.
    pub fn on_event(row: Subject, cell: DateCell, event: EventRef) -> Self {
        Self {
            cell: Some(cell),
            row: Some(row),
            event: Some(event),
        }
    }

    /// True when nothing but grid space was clicked.
    pub fn is_empty_space(&self) -> bool {
        self.event.is_none()
    }
}
