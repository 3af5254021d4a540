// Engine error taxonomy
// Every variant is recovered inside the engine; none escapes to the host as a panic.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::menu::MenuAction;

/// Failures the selection and action engine can run into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The acting user lacks the capability for the requested action.
    #[error("You are not allowed to {action} this item")]
    PolicyDenied { action: MenuAction },

    /// A range was attempted across two subjects' rows or with unusable dates.
    #[error("Cannot span a selection from subject {from_subject} ({from}) to subject {to_subject} ({to})")]
    InvalidSelectionSpan {
        from_subject: i64,
        from: NaiveDate,
        to_subject: i64,
        to: NaiveDate,
    },

    /// The action needs an existing event under the pointer and there was none.
    #[error("No event selected for {action}")]
    MissingTarget { action: MenuAction },

    /// A host collaborator (modal, record store, role lookup) failed.
    #[error("{message}")]
    CollaboratorFailure { message: String },
}

impl EngineError {
    /// Wrap a collaborator error, keeping the whole context chain in the message.
    pub fn collaborator(err: &anyhow::Error) -> Self {
        EngineError::CollaboratorFailure {
            message: format!("{:#}", err),
        }
    }
}
