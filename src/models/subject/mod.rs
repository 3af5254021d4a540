// Subject module
// The person whose roster row is being interacted with, and the acting user

use serde::{Deserialize, Serialize};

/// Normalize a login name for comparisons.
///
/// Strips claims prefixes (`i:0#.f|membership|jan@corp.nl`) and domain prefixes
/// (`CORP\jan`), trims whitespace and lowercases.
///
/// # Examples
/// ```
/// use roster_grid::models::subject::normalize_username;
///
/// assert_eq!(normalize_username("i:0#.w|CORP\\JDeVries"), "jdevries");
/// assert_eq!(normalize_username("  Anna@Corp.nl "), "anna@corp.nl");
/// ```
pub fn normalize_username(raw: &str) -> String {
    let trimmed = raw.trim();
    let after_claims = trimmed.rsplit('|').next().unwrap_or(trimmed);
    let after_domain = after_claims.rsplit('\\').next().unwrap_or(after_claims);
    after_domain.trim().to_lowercase()
}

/// A roster row: the employee a selection or an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

impl Subject {
    pub fn new(id: i64, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
        }
    }

    pub fn normalized_username(&self) -> String {
        normalize_username(&self.username)
    }
}

/// The signed-in user together with their role memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl ActingUser {
    pub fn new(id: i64, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            roles: Vec::new(),
        }
    }

    /// Set the role memberships
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn normalized_username(&self) -> String {
        normalize_username(&self.username)
    }

    /// The user's own roster row, used when no other subject can be resolved.
    pub fn as_subject(&self) -> Subject {
        Subject::new(self.id, self.username.clone(), self.display_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_name() {
        assert_eq!(normalize_username("Anna"), "anna");
    }

    #[test]
    fn test_normalize_claims_prefix() {
        assert_eq!(
            normalize_username("i:0#.f|membership|Piet@Corp.nl"),
            "piet@corp.nl"
        );
    }

    #[test]
    fn test_normalize_domain_prefix() {
        assert_eq!(normalize_username("CORP\\Klaas "), "klaas");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_username("   "), "");
    }

    #[test]
    fn test_user_as_subject() {
        let user = ActingUser::new(4, "CORP\\Els", "Els Jansen").with_roles(["Medewerkers"]);
        let subject = user.as_subject();

        assert_eq!(subject.id, 4);
        assert_eq!(subject.display_name, "Els Jansen");
        assert_eq!(subject.normalized_username(), user.normalized_username());
    }
}
