//! Contracts the host application implements for the engine.
//!
//! The engine never touches the presentation layer or the backend directly; it
//! only talks to these traits. Async methods are awaited on the host's
//! single-threaded event loop.

// Futures are driven on one thread; no Send bound is required of hosts.
#![allow(async_fn_in_trait)]

use std::rc::Rc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::context_target::ContextTarget;
use crate::models::event_ref::EventType;
use crate::models::intent::Intent;

/// Maps a host-specific gesture target (a DOM node, a widget id, a grid point)
/// to the typed snapshot of what was clicked.
#[cfg_attr(test, mockall::automock(type Target = String;))]
pub trait CellContextResolver {
    type Target;

    fn resolve_cell_context(&self, target: &Self::Target) -> ContextTarget;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// User-visible notification surface (toasts, system notifications, logs).
pub trait Notifier {
    fn notify(&self, level: NotifyLevel, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, level: NotifyLevel, message: &str) {
        (**self).notify(level, message)
    }
}

impl<T: Notifier + ?Sized> Notifier for Rc<T> {
    fn notify(&self, level: NotifyLevel, message: &str) {
        (**self).notify(level, message)
    }
}

/// Yes/no prompt shown before a destructive intent is executed.
pub trait Confirmer {
    async fn confirm(&self, intent: &Intent) -> bool;
}

/// Opens the create/edit/comment dialogs, keyed by the intent's event type.
pub trait ModalOpener {
    fn open_create(&self, intent: &Intent) -> Result<()>;

    fn open_edit(&self, intent: &Intent) -> Result<()>;

    fn open_comment(&self, intent: &Intent, existing: Option<&str>) -> Result<()>;
}

/// Backend record operations. Implementations re-check permissions server-side.
pub trait RecordStore {
    async fn delete(&self, event_type: EventType, id: i64) -> Result<()>;

    async fn fetch_comment(&self, event_type: EventType, id: i64) -> Result<Option<String>>;
}

/// Role membership lookup for the acting user.
pub trait RoleDirectory {
    async fn roles_for(&self, username: &str) -> Result<Vec<String>>;
}

/// Everything the action dispatcher needs from the host.
pub trait Host: Notifier + Confirmer + ModalOpener + RecordStore {}

impl<T: Notifier + Confirmer + ModalOpener + RecordStore> Host for T {}
