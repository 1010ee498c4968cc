use chrono::{DateTime, Utc};

use super::RoleKind;

/// Role dictionary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Role {
    /// Policy-level view of this row. `None` for names outside the closed set.
    pub fn kind(&self) -> Option<RoleKind> {
        RoleKind::from_name(&self.name)
    }
}

/// Language dictionary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// Account with its role and language resolved
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
    pub language: Language,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn role_name(&self) -> &str {
        &self.role.name
    }

    pub fn language_code(&self) -> &str {
        &self.language.code
    }
}
