//! Hands built intents to the host's collaborators.
//!
//! Create and edit open dialogs, comment loads the existing comment first, and
//! delete asks for confirmation then removes the record. Failures end up as
//! notifications; nothing is retried here.

mod lock;

pub use lock::{DestructiveLock, LockGuard};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::event_ref::EventType;
use crate::models::intent::Intent;
use crate::models::menu::MenuAction;
use crate::services::collaborators::{Host, NotifyLevel};

/// How a dispatched intent ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "outcome", content = "message")]
pub enum DispatchOutcome {
    /// A create/edit/comment dialog was opened
    Opened,
    Deleted,
    /// The user declined the delete confirmation
    Cancelled,
    /// Another destructive call is still running
    Busy,
    Failed(String),
}

impl DispatchOutcome {
    /// Whether the intent was carried out
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Opened | DispatchOutcome::Deleted)
    }
}

pub struct ActionDispatcher<H> {
    host: H,
    lock: DestructiveLock,
}

impl<H: Host> ActionDispatcher<H> {
    pub fn new(host: H, lock: DestructiveLock) -> Self {
        Self { host, lock }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_busy(&self) -> bool {
        self.lock.is_held()
    }

    /// Execute an intent through the host. Errors are reported, never returned.
    pub async fn dispatch(&self, intent: &Intent) -> DispatchOutcome {
        match self.execute(intent).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("{} failed: {}", intent.action, err);
                self.host.notify(NotifyLevel::Error, &err.to_string());
                DispatchOutcome::Failed(err.to_string())
            }
        }
    }

    async fn execute(&self, intent: &Intent) -> Result<DispatchOutcome, EngineError> {
        match intent.action {
            MenuAction::Create => {
                self.host
                    .open_create(intent)
                    .map_err(|e| EngineError::collaborator(&e))?;
                Ok(DispatchOutcome::Opened)
            }
            MenuAction::Edit => {
                event_key(intent)?;
                self.host
                    .open_edit(intent)
                    .map_err(|e| EngineError::collaborator(&e))?;
                Ok(DispatchOutcome::Opened)
            }
            MenuAction::Comment => {
                let (event_type, id) = event_key(intent)?;
                let existing = self
                    .host
                    .fetch_comment(event_type, id)
                    .await
                    .with_context(|| format!("Failed to load comment for {} {}", event_type, id))
                    .map_err(|e| EngineError::collaborator(&e))?;
                self.host
                    .open_comment(intent, existing.as_deref())
                    .map_err(|e| EngineError::collaborator(&e))?;
                Ok(DispatchOutcome::Opened)
            }
            MenuAction::Delete => self.delete(intent).await,
        }
    }

    async fn delete(&self, intent: &Intent) -> Result<DispatchOutcome, EngineError> {
        let (event_type, id) = event_key(intent)?;

        let Some(_guard) = self.lock.try_acquire() else {
            log::warn!("Delete of {} {} ignored: another delete is running", event_type, id);
            self.host
                .notify(NotifyLevel::Info, "Please wait until the current delete has finished");
            return Ok(DispatchOutcome::Busy);
        };

        if !self.host.confirm(intent).await {
            log::info!("Delete of {} {} cancelled by user", event_type, id);
            return Ok(DispatchOutcome::Cancelled);
        }

        self.host
            .delete(event_type, id)
            .await
            .with_context(|| format!("Failed to delete {}", intent.describe()))
            .map_err(|e| EngineError::collaborator(&e))?;

        log::info!("Deleted {} {}", event_type, id);
        self.host
            .notify(NotifyLevel::Success, &format!("Deleted {}", intent.describe()));
        Ok(DispatchOutcome::Deleted)
    }
}

fn event_key(intent: &Intent) -> Result<(EventType, i64), EngineError> {
    match (intent.event_type, intent.event_id) {
        (Some(event_type), Some(id)) => Ok((event_type, id)),
        _ => Err(EngineError::MissingTarget {
            action: intent.action,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cell::DateRange;
    use crate::models::subject::Subject;
    use crate::services::collaborators::{Confirmer, ModalOpener, Notifier, RecordStore};
    use crate::services::notification::ToastQueue;
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        confirm_answer: bool,
        fail_delete: bool,
        comment: Option<String>,
        lock: Option<DestructiveLock>,
        calls: RefCell<Vec<String>>,
        lock_held_during_delete: RefCell<Option<bool>>,
        toasts: ToastQueue,
    }

    impl Notifier for RecordingHost {
        fn notify(&self, level: NotifyLevel, message: &str) {
            self.toasts.notify(level, message);
        }
    }

    impl Confirmer for RecordingHost {
        async fn confirm(&self, intent: &Intent) -> bool {
            self.calls.borrow_mut().push(format!("confirm {}", intent.describe()));
            self.confirm_answer
        }
    }

    impl ModalOpener for RecordingHost {
        fn open_create(&self, intent: &Intent) -> Result<()> {
            self.calls.borrow_mut().push(format!("create {}", intent.describe()));
            Ok(())
        }

        fn open_edit(&self, intent: &Intent) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("edit {:?}", intent.event_id));
            Ok(())
        }

        fn open_comment(&self, _intent: &Intent, existing: Option<&str>) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("comment {:?}", existing));
            Ok(())
        }
    }

    impl RecordStore for RecordingHost {
        async fn delete(&self, event_type: EventType, id: i64) -> Result<()> {
            *self.lock_held_during_delete.borrow_mut() =
                self.lock.as_ref().map(DestructiveLock::is_held);
            self.calls
                .borrow_mut()
                .push(format!("delete {} {}", event_type, id));
            if self.fail_delete {
                Err(anyhow!("HTTP 500"))
            } else {
                Ok(())
            }
        }

        async fn fetch_comment(&self, _event_type: EventType, _id: i64) -> Result<Option<String>> {
            Ok(self.comment.clone())
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
    }

    fn intent(action: MenuAction) -> Intent {
        Intent {
            action,
            event_type: Some(EventType::Leave),
            event_id: if action == MenuAction::Create { None } else { Some(11) },
            subject: Subject::new(2, "bram", "Bram"),
            date_range: Some(DateRange::single(date())),
        }
    }

    #[tokio::test]
    async fn test_create_opens_dialog() {
        let dispatcher = ActionDispatcher::new(RecordingHost::default(), DestructiveLock::new());

        let outcome = dispatcher.dispatch(&intent(MenuAction::Create)).await;

        assert_eq!(outcome, DispatchOutcome::Opened);
        assert_eq!(
            *dispatcher.host().calls.borrow(),
            vec!["create Leave for Bram on 03-02-2025".to_string()]
        );
    }

    #[tokio::test]
    async fn test_comment_loads_existing_first() {
        let host = RecordingHost {
            comment: Some("Half day".to_string()),
            ..Default::default()
        };
        let dispatcher = ActionDispatcher::new(host, DestructiveLock::new());

        let outcome = dispatcher.dispatch(&intent(MenuAction::Comment)).await;

        assert_eq!(outcome, DispatchOutcome::Opened);
        assert_eq!(
            *dispatcher.host().calls.borrow(),
            vec!["comment Some(\"Half day\")".to_string()]
        );
    }

    #[tokio::test]
    async fn test_declined_delete_is_not_forwarded() {
        let dispatcher = ActionDispatcher::new(RecordingHost::default(), DestructiveLock::new());

        let outcome = dispatcher.dispatch(&intent(MenuAction::Delete)).await;

        assert_eq!(outcome, DispatchOutcome::Cancelled);
        assert!(dispatcher
            .host()
            .calls
            .borrow()
            .iter()
            .all(|call| !call.starts_with("delete")));
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_confirmed_delete_holds_lock_then_releases() {
        let lock = DestructiveLock::new();
        let host = RecordingHost {
            confirm_answer: true,
            lock: Some(lock.clone()),
            ..Default::default()
        };
        let dispatcher = ActionDispatcher::new(host, lock.clone());

        let outcome = dispatcher.dispatch(&intent(MenuAction::Delete)).await;

        assert_eq!(outcome, DispatchOutcome::Deleted);
        assert_eq!(*dispatcher.host().lock_held_during_delete.borrow(), Some(true));
        assert!(!lock.is_held());
        assert_eq!(
            dispatcher.host().toasts.messages(),
            vec![(NotifyLevel::Success, "Deleted Leave for Bram on 03-02-2025".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_notifies_and_releases() {
        let lock = DestructiveLock::new();
        let host = RecordingHost {
            confirm_answer: true,
            fail_delete: true,
            ..Default::default()
        };
        let dispatcher = ActionDispatcher::new(host, lock.clone());

        let outcome = dispatcher.dispatch(&intent(MenuAction::Delete)).await;

        assert_eq!(
            outcome,
            DispatchOutcome::Failed("Failed to delete Leave for Bram on 03-02-2025: HTTP 500".to_string())
        );
        assert!(!lock.is_held());
        assert_eq!(dispatcher.host().toasts.messages()[0].0, NotifyLevel::Error);
    }

    #[tokio::test]
    async fn test_delete_while_busy() {
        let lock = DestructiveLock::new();
        let host = RecordingHost {
            confirm_answer: true,
            ..Default::default()
        };
        let dispatcher = ActionDispatcher::new(host, lock.clone());
        let _running = lock.try_acquire().unwrap();

        let outcome = dispatcher.dispatch(&intent(MenuAction::Delete)).await;

        assert_eq!(outcome, DispatchOutcome::Busy);
        assert!(dispatcher.host().calls.borrow().is_empty());
        assert!(lock.is_held());
    }

    #[tokio::test]
    async fn test_edit_without_event_id_fails() {
        let dispatcher = ActionDispatcher::new(RecordingHost::default(), DestructiveLock::new());
        let mut edit = intent(MenuAction::Edit);
        edit.event_id = None;

        let outcome = dispatcher.dispatch(&edit).await;

        assert_eq!(outcome, DispatchOutcome::Failed("No event selected for edit".to_string()));
    }
}
