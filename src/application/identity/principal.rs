//! Bearer token → active account resolution

use thiserror::Error;
use tracing::{debug, error};

use crate::domain::{Account, AccountRepositoryInterface};
use crate::infrastructure::crypto::{JwtConfig, TokenError};

/// Failures raised before any business logic runs.
///
/// Rendered as a bare `{detail}` body, never as the business envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer credential on the request
    #[error("Not authenticated")]
    MissingToken,

    /// Bad signature, corrupt token or unusable subject
    #[error("Invalid authentication credentials")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Subject does not exist or is deactivated; the two are not told apart
    #[error("Inactive or invalid user")]
    InactiveOrInvalid,

    #[error("Admin or Superadmin privileges required")]
    Forbidden,

    /// Signing settings unusable; a server fault
    #[error("Authentication is misconfigured: {0}")]
    Misconfigured(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Misconfigured(_) | Self::Storage(_))
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => Self::TokenExpired,
            e if e.is_configuration() => Self::Misconfigured(e.to_string()),
            TokenError::Signing(reason) => Self::Misconfigured(reason),
            _ => Self::InvalidToken,
        }
    }
}

/// Resolve a bearer token to the active account it was issued for.
///
/// Read-only: nothing is written on any path.
pub async fn resolve_principal<R>(
    token: &str,
    jwt_config: &JwtConfig,
    accounts: &R,
) -> Result<Account, AuthError>
where
    R: AccountRepositoryInterface + ?Sized,
{
    let codec = jwt_config.codec().map_err(|e| {
        error!("Cannot verify bearer token: {}", e);
        AuthError::from(e)
    })?;

    let account_id = codec.verify(token).map_err(|e| {
        debug!("Bearer token rejected: {}", e);
        AuthError::from(e)
    })?;

    let account = accounts.find_by_id(account_id).await.map_err(|e| {
        error!(account_id, "Principal lookup failed: {}", e);
        AuthError::Storage(e.to_string())
    })?;

    match account {
        Some(account) if account.is_active => Ok(account),
        _ => {
            debug!(account_id, "Token subject missing or inactive");
            Err(AuthError::InactiveOrInvalid)
        }
    }
}
