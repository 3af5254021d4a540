//! Context menu controller for the roster grid.
//!
//! Captures what was right-clicked, places the menu inside the viewport once its
//! size is known, and computes which entries are enabled. Dismissing the menu
//! never touches the selection.

mod placement;

pub use placement::clamp_to_viewport;

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::models::context_target::ContextTarget;
use crate::models::event_ref::EventType;
use crate::models::menu::{MenuAction, MenuEntry, MenuGate};
use crate::models::selection::Selection;
use crate::models::subject::{ActingUser, Subject};
use crate::services::collaborators::CellContextResolver;
use crate::services::permission::PermissionPolicy;

/// Why an open menu was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DismissReason {
    ClickOutside,
    Scroll,
    Resize,
    Escape,
    ActionActivated,
}

/// State of one open menu; dropped as a whole on dismissal.
#[derive(Debug, Clone)]
struct OpenMenu {
    target: ContextTarget,
    anchor: Pos2,
    /// Known only after the host measured the rendered menu
    placement: Option<Rect>,
    submenu_open: bool,
}

#[derive(Debug)]
pub struct ContextMenuController {
    margin: f32,
    open: Option<OpenMenu>,
}

impl ContextMenuController {
    pub fn new(margin: f32) -> Self {
        Self { margin, open: None }
    }

    /// Capture a fresh target for a right-click. Any previous menu is replaced.
    pub fn open<R>(&mut self, resolver: &R, gesture: &R::Target, anchor: Pos2) -> ContextTarget
    where
        R: CellContextResolver + ?Sized,
    {
        let target = resolver.resolve_cell_context(gesture);
        log::debug!(
            "Context menu opened at ({:.0}, {:.0}) on {}",
            anchor.x,
            anchor.y,
            if target.is_empty_space() { "empty space" } else { "event" }
        );
        self.open = Some(OpenMenu {
            target: target.clone(),
            anchor,
            placement: None,
            submenu_open: false,
        });
        target
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn target(&self) -> Option<&ContextTarget> {
        self.open.as_ref().map(|menu| &menu.target)
    }

    pub fn anchor(&self) -> Option<Pos2> {
        self.open.as_ref().map(|menu| menu.anchor)
    }

    pub fn placement(&self) -> Option<Rect> {
        self.open.as_ref().and_then(|menu| menu.placement)
    }

    /// Second phase of opening: place the measured menu inside the viewport.
    pub fn place(&mut self, menu_size: Vec2, viewport: Rect) -> Option<Rect> {
        let margin = self.margin;
        let menu = self.open.as_mut()?;
        let rect = clamp_to_viewport(menu.anchor, menu_size, viewport, margin);
        menu.placement = Some(rect);
        Some(rect)
    }

    /// Open the "choose event type" submenu. Only possible when creating is allowed.
    pub fn open_submenu(&mut self, gate: &MenuGate) -> bool {
        match self.open.as_mut() {
            Some(menu) if gate.can_create => {
                menu.submenu_open = true;
                true
            }
            _ => false,
        }
    }

    pub fn close_submenu(&mut self) {
        if let Some(menu) = self.open.as_mut() {
            menu.submenu_open = false;
        }
    }

    pub fn is_submenu_open(&self) -> bool {
        self.open.as_ref().is_some_and(|menu| menu.submenu_open)
    }

    /// Close the menu and drop its transient state. Safe to call when closed.
    pub fn dismiss(&mut self, reason: DismissReason) -> Option<ContextTarget> {
        let menu = self.open.take()?;
        log::debug!("Context menu dismissed: {:?}", reason);
        Some(menu.target)
    }
}

/// Subject a "create" action would be for: the selection's subject, then the
/// clicked row. `None` means the user acts for themselves.
pub fn create_subject<'a>(
    target: &'a ContextTarget,
    selection: &'a Selection,
) -> Option<&'a Subject> {
    selection.subject.as_ref().or(target.row.as_ref())
}

/// Enabled state of every menu action. Pure in its inputs.
pub fn compute_gate(
    policy: &PermissionPolicy,
    target: &ContextTarget,
    selection: &Selection,
    user: &ActingUser,
) -> MenuGate {
    let caps = target
        .event
        .as_ref()
        .map(|event| policy.can_act_on_event(user, event))
        .unwrap_or_default();

    MenuGate {
        can_edit: caps.can_edit,
        can_delete: caps.can_delete,
        can_create: policy.can_create_for(user, create_subject(target, selection)),
        can_comment: caps.can_comment,
    }
}

/// Menu entries for a target. Event actions are listed only for event targets;
/// "create" is always listed and carries the event-type submenu when enabled.
pub fn menu_entries(target: &ContextTarget, gate: &MenuGate) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    if !target.is_empty_space() {
        for action in [MenuAction::Edit, MenuAction::Comment, MenuAction::Delete] {
            entries.push(MenuEntry::action(action, gate.allows(action)));
        }
    }

    let mut create = MenuEntry::action(MenuAction::Create, gate.can_create);
    if gate.can_create {
        create.children = EventType::ALL
            .into_iter()
            .map(MenuEntry::create_type)
            .collect();
    }
    entries.push(create);

    entries
}
