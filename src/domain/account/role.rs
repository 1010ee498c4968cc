//! Closed set of roles known to the access policy

use std::fmt;

/// Role names the service grants privileges to.
///
/// Matching is exact and case-sensitive: a dictionary row named `Admin` is not
/// [`RoleKind::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    User,
    Admin,
    Superadmin,
}

impl RoleKind {
    /// Roles allowed on admin-scoped routes
    pub const ADMINISTRATORS: &'static [RoleKind] = &[RoleKind::Admin, RoleKind::Superadmin];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            "superadmin" => Some(Self::Superadmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in [RoleKind::User, RoleKind::Admin, RoleKind::Superadmin] {
            assert_eq!(RoleKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(RoleKind::from_name("Admin"), None);
        assert_eq!(RoleKind::from_name("SUPERADMIN"), None);
        assert_eq!(RoleKind::from_name(""), None);
    }
}
