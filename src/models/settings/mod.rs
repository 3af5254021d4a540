// Settings module
// Engine configuration: privileged roles, menu placement and post-action behavior

use serde::{Deserialize, Serialize};

use crate::models::event_ref::EventType;

/// Role-name fragments that grant cross-subject management.
///
/// Matched as case-insensitive substrings of the user's role memberships.
pub const DEFAULT_PRIVILEGED_ROLES: &[&str] = &[
    "beheer",
    "admin",
    "teamleider",
    "planning",
    "senioren administratie",
];

pub const DEFAULT_MENU_MARGIN: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub privileged_roles: Vec<String>,
    /// Minimum gap between the context menu and each viewport edge
    pub menu_margin: f32,
    pub clear_selection_after_action: bool,
    /// Used when "create" is chosen without picking a type from the submenu
    pub default_event_type: EventType,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            privileged_roles: DEFAULT_PRIVILEGED_ROLES
                .iter()
                .map(|role| role.to_string())
                .collect(),
            menu_margin: DEFAULT_MENU_MARGIN,
            clear_selection_after_action: true,
            default_event_type: EventType::Leave,
        }
    }
}

impl EngineSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), String> {
        if !self.menu_margin.is_finite() || self.menu_margin < 0.0 {
            return Err(format!(
                "Menu margin must be a non-negative number, got {}",
                self.menu_margin
            ));
        }

        if self.privileged_roles.iter().all(|role| role.trim().is_empty()) {
            log::warn!("No privileged roles configured; nobody will be elevated");
        }

        Ok(())
    }

    /// Trim and lowercase role fragments, dropping empty ones.
    pub fn normalized(mut self) -> Self {
        self.privileged_roles = self
            .privileged_roles
            .iter()
            .map(|role| role.trim().to_lowercase())
            .filter(|role| !role.is_empty())
            .collect();
        self
    }
}
