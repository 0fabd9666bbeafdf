//! Staff roles and role-priority resolution.

use serde::{Deserialize, Serialize};

/// Role of an authenticated staff member.
///
/// Variants are ordered by privilege: `Reviewer < Editor < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Reads and triages submissions.
    Reviewer,
    /// Edits templates, configuration and site copy.
    Editor,
    /// Everything, including domain mappings.
    Admin,
}

/// Lookup order when a staff member holds several roles.
pub const ROLE_PRIORITY: [StaffRole; 3] = [StaffRole::Admin, StaffRole::Editor, StaffRole::Reviewer];

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Reviewer => "reviewer",
            StaffRole::Editor => "editor",
            StaffRole::Admin => "admin",
        }
    }

    /// Parses a stored role name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        ROLE_PRIORITY
            .iter()
            .copied()
            .find(|role| s.trim().eq_ignore_ascii_case(role.as_str()))
    }

    /// Whether this role grants at least the privileges of `required`.
    pub fn satisfies(self, required: StaffRole) -> bool {
        self >= required
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the highest-priority recognised role in `roles`.
///
/// Unknown role names are ignored; `None` means the holder has no staff role.
pub fn resolve_staff_role<S: AsRef<str>>(roles: &[S]) -> Option<StaffRole> {
    ROLE_PRIORITY.iter().copied().find(|candidate| {
        roles
            .iter()
            .any(|role| StaffRole::parse(role.as_ref()) == Some(*candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_picks_highest_priority() {
        assert_eq!(
            resolve_staff_role(&["reviewer", "admin", "editor"]),
            Some(StaffRole::Admin)
        );
        assert_eq!(
            resolve_staff_role(&["reviewer", "editor"]),
            Some(StaffRole::Editor)
        );
        assert_eq!(resolve_staff_role(&["reviewer"]), Some(StaffRole::Reviewer));
    }

    #[test]
    fn test_resolve_ignores_unknown_and_case() {
        assert_eq!(
            resolve_staff_role(&["speaker", " ADMIN "]),
            Some(StaffRole::Admin)
        );
        assert_eq!(resolve_staff_role(&["speaker", "sponsor"]), None);
        assert_eq!(resolve_staff_role::<&str>(&[]), None);
    }

    #[test]
    fn test_satisfies() {
        assert!(StaffRole::Admin.satisfies(StaffRole::Editor));
        assert!(StaffRole::Editor.satisfies(StaffRole::Editor));
        assert!(!StaffRole::Reviewer.satisfies(StaffRole::Editor));
        assert!(!StaffRole::Editor.satisfies(StaffRole::Admin));
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&StaffRole::Editor).unwrap(), "\"editor\"");
        assert_eq!(StaffRole::Admin.to_string(), "admin");
    }
}
