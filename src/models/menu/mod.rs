// Menu module
// Context menu actions, gating flags and entries

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::event_ref::EventType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    Edit,
    Delete,
    Create,
    Comment,
}

impl MenuAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::Edit => "edit",
            MenuAction::Delete => "delete",
            MenuAction::Create => "create",
            MenuAction::Comment => "comment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Edit => "✏ Edit",
            MenuAction::Delete => "🗑 Delete",
            MenuAction::Create => "📅 New",
            MenuAction::Comment => "💬 Comment",
        }
    }

    /// Actions that operate on an existing event
    pub fn needs_event(&self) -> bool {
        !matches!(self, MenuAction::Create)
    }

    /// Only delete needs a yes/no confirmation before it is executed
    pub fn is_destructive(&self) -> bool {
        matches!(self, MenuAction::Delete)
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived permission facts for one user against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub is_elevated: bool,
    pub owns_event: bool,
}

impl Permissions {
    pub fn may_act_on_event(&self) -> bool {
        self.is_elevated || self.owns_event
    }
}

/// Capabilities on an existing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventCapabilities {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_comment: bool,
}

impl EventCapabilities {
    pub fn allows(&self, action: MenuAction) -> bool {
        match action {
            MenuAction::Edit => self.can_edit,
            MenuAction::Delete => self.can_delete,
            MenuAction::Comment => self.can_comment,
            MenuAction::Create => false,
        }
    }
}

/// Enabled state of each context menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuGate {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_create: bool,
    pub can_comment: bool,
}

impl MenuGate {
    pub fn allows(&self, action: MenuAction) -> bool {
        match action {
            MenuAction::Edit => self.can_edit,
            MenuAction::Delete => self.can_delete,
            MenuAction::Create => self.can_create,
            MenuAction::Comment => self.can_comment,
        }
    }
}

/// What a menu entry does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "value")]
pub enum MenuCommand {
    Action(MenuAction),
    /// Leaf of the "create" submenu
    CreateType(EventType),
}

/// A single line in the rendered context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub command: MenuCommand,
    pub label: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn action(action: MenuAction, enabled: bool) -> Self {
        Self {
            command: MenuCommand::Action(action),
            label: action.label().to_string(),
            enabled,
            children: Vec::new(),
        }
    }

    pub fn create_type(event_type: EventType) -> Self {
        Self {
            command: MenuCommand::CreateType(event_type),
            label: event_type.label().to_string(),
            enabled: true,
            children: Vec::new(),
        }
    }

    pub fn has_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}
