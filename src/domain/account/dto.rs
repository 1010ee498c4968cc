/// Changes applied to one account in a single transaction.
///
/// References are raw caller input; the repository resolves them
/// case-insensitively and fails the whole change if one does not resolve.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub is_active: Option<bool>,
    pub language_code: Option<String>,
    pub role_name: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.language_code.is_none() && self.role_name.is_none()
    }
}

/// Account to insert; role and language are looked up by exact name/code.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_name: String,
    pub language_code: String,
    pub is_active: bool,
}
