// Permission service
// Decides who may edit, delete, comment on or create roster events

use crate::models::event_ref::EventRef;
use crate::models::menu::{EventCapabilities, Permissions};
use crate::models::settings::EngineSettings;
use crate::models::subject::{normalize_username, ActingUser, Subject};

/// Pure permission policy over a configured list of privileged-role fragments.
///
/// Elevation is a case-insensitive *substring* match of a fragment inside any of
/// the user's role names, so `"beheer"` elevates members of `"Roosterbeheerders"`.
/// This tolerates naming drift in the role catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPolicy {
    privileged_roles: Vec<String>,
}

impl PermissionPolicy {
    pub fn new<I, S>(privileged_roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            privileged_roles: privileged_roles
                .into_iter()
                .map(|role| role.as_ref().trim().to_lowercase())
                .filter(|role| !role.is_empty())
                .collect(),
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(&settings.privileged_roles)
    }

    pub fn privileged_roles(&self) -> &[String] {
        &self.privileged_roles
    }

    pub fn is_elevated(&self, user: &ActingUser) -> bool {
        user.roles.iter().any(|role| {
            let role = role.to_lowercase();
            self.privileged_roles
                .iter()
                .any(|fragment| role.contains(fragment.as_str()))
        })
    }

    pub fn owns_event(&self, user: &ActingUser, event: &EventRef) -> bool {
        let me = user.normalized_username();
        !me.is_empty() && me == normalize_username(&event.owner_username)
    }

    /// Permission facts for the user against an optional event.
    pub fn permissions(&self, user: &ActingUser, event: Option<&EventRef>) -> Permissions {
        Permissions {
            is_elevated: self.is_elevated(user),
            owns_event: event.is_some_and(|event| self.owns_event(user, event)),
        }
    }

    pub fn can_act_on_event(&self, user: &ActingUser, event: &EventRef) -> EventCapabilities {
        let allowed = self.permissions(user, Some(event)).may_act_on_event();
        EventCapabilities {
            can_edit: allowed,
            can_delete: allowed,
            can_comment: allowed,
        }
    }

    /// Whether the user may create an event on `subject`'s row.
    ///
    /// An absent subject means "for myself" and is always allowed.
    pub fn can_create_for(&self, user: &ActingUser, subject: Option<&Subject>) -> bool {
        match subject {
            None => true,
            Some(subject) => {
                self.is_elevated(user)
                    || subject.normalized_username() == user.normalized_username()
            }
        }
    }
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}
