//! The roster grid engine: one instance per grid, owning the selection and the
//! open context menu for the current interaction cycle.
//!
//! The host forwards gestures here, reads the selection and menu gate back, and
//! executes the produced intents through an [`ActionDispatcher`].

use std::rc::Rc;

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};

use crate::error::EngineError;
use crate::models::context_target::ContextTarget;
use crate::models::intent::Intent;
use crate::models::marker::MarkerDiff;
use crate::models::menu::{MenuAction, MenuCommand, MenuEntry, MenuGate};
use crate::models::selection::Selection;
use crate::models::settings::EngineSettings;
use crate::models::subject::{ActingUser, Subject};
use crate::services::collaborators::{
    CellContextResolver, Host, Notifier, NotifyLevel, RoleDirectory,
};
use crate::services::context_menu::{
    compute_gate, menu_entries, ContextMenuController, DismissReason,
};
use crate::services::dispatcher::{ActionDispatcher, DestructiveLock, DispatchOutcome};
use crate::services::intent::IntentBuilder;
use crate::services::permission::PermissionPolicy;
use crate::services::selection::{MarkerBoard, SelectionMachine};
use crate::utils::date::today;

/// What the host needs to render an opened context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub target: ContextTarget,
    pub gate: MenuGate,
    pub entries: Vec<MenuEntry>,
}

pub struct GridEngine {
    settings: EngineSettings,
    policy: PermissionPolicy,
    user: ActingUser,
    selection: SelectionMachine,
    menu: ContextMenuController,
    lock: DestructiveLock,
    notifier: Rc<dyn Notifier>,
}

impl GridEngine {
    pub fn new(settings: EngineSettings, user: ActingUser, notifier: Rc<dyn Notifier>) -> Self {
        let settings = settings.normalized();
        Self {
            policy: PermissionPolicy::from_settings(&settings),
            menu: ContextMenuController::new(settings.menu_margin),
            settings,
            user,
            selection: SelectionMachine::new(),
            lock: DestructiveLock::new(),
            notifier,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn user(&self) -> &ActingUser {
        &self.user
    }

    pub fn policy(&self) -> &PermissionPolicy {
        &self.policy
    }

    pub fn is_elevated(&self) -> bool {
        self.policy.is_elevated(&self.user)
    }

    /// Dispatcher sharing this engine's destructive lock.
    pub fn dispatcher<H: Host>(&self, host: H) -> ActionDispatcher<H> {
        ActionDispatcher::new(host, self.lock.clone())
    }

    pub fn is_busy(&self) -> bool {
        self.lock.is_held()
    }

    // --- Gestures -----------------------------------------------------------

    pub fn on_primary_select(&mut self, subject: &Subject, date: NaiveDate) -> MarkerDiff {
        if self.refuse_while_busy("primary select") {
            return MarkerDiff::default();
        }
        self.selection.primary_select(subject, date)
    }

    pub fn on_row_select(&mut self, subject: &Subject) -> MarkerDiff {
        if self.refuse_while_busy("row select") {
            return MarkerDiff::default();
        }
        self.selection.row_select(subject)
    }

    /// Right-click: capture the target and compute the menu for it.
    pub fn on_context_menu<R>(
        &mut self,
        resolver: &R,
        gesture: &R::Target,
        anchor: Pos2,
    ) -> Option<MenuView>
    where
        R: CellContextResolver + ?Sized,
    {
        if self.refuse_while_busy("context menu") {
            return None;
        }
        let target = self.menu.open(resolver, gesture, anchor);
        let gate = self.get_menu_gate(&target);
        let entries = menu_entries(&target, &gate);
        Some(MenuView {
            target,
            gate,
            entries,
        })
    }

    /// Place the open menu once the host has measured it.
    pub fn place_menu(&mut self, menu_size: Vec2, viewport: Rect) -> Option<Rect> {
        self.menu.place(menu_size, viewport)
    }

    /// Open the event-type submenu of "create". Empty when creating is not allowed.
    pub fn open_create_submenu(&mut self) -> Vec<MenuEntry> {
        let Some(target) = self.menu.target().cloned() else {
            return Vec::new();
        };
        let gate = self.get_menu_gate(&target);
        if !self.menu.open_submenu(&gate) {
            return Vec::new();
        }
        menu_entries(&target, &gate)
            .into_iter()
            .find(|entry| entry.command == MenuCommand::Action(MenuAction::Create))
            .map(|entry| entry.children)
            .unwrap_or_default()
    }

    pub fn close_create_submenu(&mut self) {
        self.menu.close_submenu();
    }

    /// Click outside, scroll or resize. Keeps the selection.
    pub fn on_dismiss(&mut self, reason: DismissReason) {
        self.menu.dismiss(reason);
    }

    /// Escape cancels the selection and closes any open menu.
    ///
    /// Honoured even while a delete is running; the running call owns its own
    /// copy of the intent.
    pub fn on_escape(&mut self) -> MarkerDiff {
        self.menu.dismiss(DismissReason::Escape);
        self.selection.clear()
    }

    /// Programmatic reset of the selection.
    pub fn clear_selection(&mut self) -> MarkerDiff {
        self.selection.clear()
    }

    // --- Queries ------------------------------------------------------------

    pub fn get_selection(&self) -> Selection {
        self.selection.snapshot()
    }

    pub fn get_menu_gate(&self, target: &ContextTarget) -> MenuGate {
        compute_gate(&self.policy, target, self.selection.current(), &self.user)
    }

    pub fn menu_target(&self) -> Option<&ContextTarget> {
        self.menu.target()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn is_submenu_open(&self) -> bool {
        self.menu.is_submenu_open()
    }

    pub fn menu_placement(&self) -> Option<Rect> {
        self.menu.placement()
    }

    pub fn markers(&self) -> &MarkerBoard {
        self.selection.markers()
    }

    // --- Actions ------------------------------------------------------------

    /// Activate a menu entry, closing the menu.
    ///
    /// Returns the intent to execute, or `None` after reporting why not. Without
    /// an open menu there is no captured target and nothing is built.
    pub fn activate(&mut self, command: MenuCommand) -> Option<Intent> {
        self.activate_on(command, today())
    }

    /// [`GridEngine::activate`] with an explicit date for the "today" fallback.
    pub fn activate_on(&mut self, command: MenuCommand, today: NaiveDate) -> Option<Intent> {
        let Some(target) = self.menu.dismiss(DismissReason::ActionActivated) else {
            log::warn!("Ignoring {:?}: no context menu is open", command);
            return None;
        };

        let builder = IntentBuilder::new(&self.policy, self.settings.default_event_type);
        match builder.build(command, &target, self.selection.current(), &self.user, today) {
            Ok(intent) => {
                log::debug!("Built intent: {:?}", intent);
                Some(intent)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Finish an interaction cycle after the dispatcher ran.
    pub fn complete(&mut self, outcome: &DispatchOutcome) -> MarkerDiff {
        if outcome.is_success() && self.settings.clear_selection_after_action {
            self.selection.clear()
        } else {
            MarkerDiff::default()
        }
    }

    /// Reload the acting user's roles. On failure the previous roles are kept.
    pub async fn refresh_roles<D: RoleDirectory>(&mut self, directory: &D) -> bool {
        match directory.roles_for(&self.user.username).await {
            Ok(roles) => {
                log::info!(
                    "Loaded {} roles for {}",
                    roles.len(),
                    self.user.normalized_username()
                );
                self.user.roles = roles;
                true
            }
            Err(err) => {
                self.report(&EngineError::collaborator(
                    &err.context("Failed to load your permissions"),
                ));
                false
            }
        }
    }

    fn report(&self, err: &EngineError) {
        match err {
            EngineError::PolicyDenied { action } => {
                log::warn!("Denied {} reached activation; menu was stale", action);
                self.notifier.notify(NotifyLevel::Warning, &err.to_string());
            }
            EngineError::MissingTarget { action } => {
                log::warn!("Ignoring {}: no event under the pointer", action);
            }
            EngineError::InvalidSelectionSpan { .. } => {
                log::debug!("{}", err);
            }
            EngineError::CollaboratorFailure { .. } => {
                log::error!("{}", err);
                self.notifier.notify(NotifyLevel::Error, &err.to_string());
            }
        }
    }

    fn refuse_while_busy(&self, gesture: &str) -> bool {
        if self.lock.is_held() {
            log::warn!("Ignoring {} while a delete is running", gesture);
            return true;
        }
        false
    }
}
