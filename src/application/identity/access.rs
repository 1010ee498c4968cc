//! Role-membership policy

use super::AuthError;
use crate::domain::{Account, RoleKind};

/// Return `account` if its role is in `allowed`, otherwise `Forbidden`.
///
/// Role names are compared exactly; a stored "Admin" is not an administrator.
pub fn require_role<'a>(account: &'a Account, allowed: &[RoleKind]) -> Result<&'a Account, AuthError> {
    match account.role.kind() {
        Some(kind) if allowed.contains(&kind) => Ok(account),
        _ => Err(AuthError::Forbidden),
    }
}

/// Admin-only gate
pub fn require_administrator(account: &Account) -> Result<&Account, AuthError> {
    require_role(account, RoleKind::ADMINISTRATORS)
}
