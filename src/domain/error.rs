use thiserror::Error;

/// Business-level failures. Rendered as the `{success, message, data}` envelope
/// at the HTTP boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Login pair did not match (unknown email or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials matched but the account is deactivated
    #[error("Inactive user")]
    InactiveAccount,

    /// Target account, role or language is absent
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Partial update carried no recognised field
    #[error("Empty payload not allowed")]
    EmptyPayload,

    /// A recognised field carried an unusable value (e.g. a blank code)
    #[error("Invalid {0} value")]
    InvalidFieldValue(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl DomainError {
    /// Failures caused by the server rather than the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Token(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_public_contract() {
        assert_eq!(DomainError::NotFound("User").to_string(), "User not found");
        assert_eq!(DomainError::NotFound("Language").to_string(), "Language not found");
        assert_eq!(
            DomainError::InvalidFieldValue("role").to_string(),
            "Invalid role value"
        );
        assert_eq!(
            DomainError::EmptyPayload.to_string(),
            "Empty payload not allowed"
        );
    }

    #[test]
    fn only_server_side_failures_are_internal() {
        assert!(DomainError::Storage("locked".into()).is_internal());
        assert!(!DomainError::InvalidCredentials.is_internal());
        assert!(!DomainError::NotFound("Role").is_internal());
    }
}
