//! Turns a confirmed menu command into an [`Intent`].
//!
//! Building never performs I/O. Gating here is a guard rail for stale menus;
//! the backend remains the security boundary.

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::models::cell::DateRange;
use crate::models::context_target::ContextTarget;
use crate::models::event_ref::EventType;
use crate::models::intent::Intent;
use crate::models::menu::{MenuAction, MenuCommand};
use crate::models::selection::Selection;
use crate::models::subject::{ActingUser, Subject};
use crate::services::context_menu::create_subject;
use crate::services::permission::PermissionPolicy;

pub struct IntentBuilder<'a> {
    policy: &'a PermissionPolicy,
    default_event_type: EventType,
}

impl<'a> IntentBuilder<'a> {
    pub fn new(policy: &'a PermissionPolicy, default_event_type: EventType) -> Self {
        Self {
            policy,
            default_event_type,
        }
    }

    /// Build the intent for a menu command against the captured target and selection.
    ///
    /// `today` is the fallback date for "create" when neither a selection nor a
    /// clicked cell supplies one.
    pub fn build(
        &self,
        command: MenuCommand,
        target: &ContextTarget,
        selection: &Selection,
        user: &ActingUser,
        today: NaiveDate,
    ) -> Result<Intent, EngineError> {
        match command {
            MenuCommand::Action(MenuAction::Create) => {
                self.build_create(self.default_event_type, target, selection, user, today)
            }
            MenuCommand::CreateType(event_type) => {
                self.build_create(event_type, target, selection, user, today)
            }
            MenuCommand::Action(action) => self.build_for_event(action, target, selection, user),
        }
    }

    fn build_create(
        &self,
        event_type: EventType,
        target: &ContextTarget,
        selection: &Selection,
        user: &ActingUser,
        today: NaiveDate,
    ) -> Result<Intent, EngineError> {
        let explicit_subject = create_subject(target, selection);
        if !self.policy.can_create_for(user, explicit_subject) {
            return Err(EngineError::PolicyDenied {
                action: MenuAction::Create,
            });
        }

        let date_range = selection
            .date_range()
            .or_else(|| target.cell.map(|cell| DateRange::single(cell.date)))
            .unwrap_or_else(|| DateRange::single(today));
        let subject = explicit_subject
            .cloned()
            .unwrap_or_else(|| user.as_subject());

        Ok(Intent {
            action: MenuAction::Create,
            event_type: Some(event_type),
            event_id: None,
            subject,
            date_range: Some(date_range),
        })
    }

    fn build_for_event(
        &self,
        action: MenuAction,
        target: &ContextTarget,
        selection: &Selection,
        user: &ActingUser,
    ) -> Result<Intent, EngineError> {
        let event = target
            .event
            .as_ref()
            .ok_or(EngineError::MissingTarget { action })?;

        if !self.policy.can_act_on_event(user, event).allows(action) {
            return Err(EngineError::PolicyDenied { action });
        }

        let subject = target
            .row
            .clone()
            .or_else(|| selection.subject.clone())
            .unwrap_or_else(|| {
                Subject::new(
                    target.cell.map(|cell| cell.subject_id).unwrap_or_default(),
                    event.owner_username.clone(),
                    event.owner_username.clone(),
                )
            });

        Ok(Intent {
            action,
            event_type: Some(event.event_type),
            event_id: Some(event.id),
            subject,
            date_range: target.cell.map(|cell| DateRange::single(cell.date)),
        })
    }
}
