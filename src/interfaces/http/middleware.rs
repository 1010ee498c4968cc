//! Authentication middleware for Axum
//!
//! `auth_middleware` resolves the bearer token to an active account and stores
//! it in request extensions as [`CurrentAccount`]. `admin_middleware` must run
//! after it and admits administrators only.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

use super::common::detail_response;
use crate::application::{require_administrator, resolve_principal, AuthError};
use crate::domain::{Account, AccountRepositoryInterface};
use crate::infrastructure::crypto::JwtConfig;

/// Authentication state: signing settings and account lookup
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub accounts: Arc<dyn AccountRepositoryInterface>,
}

/// Account resolved from the bearer token
///
/// Extract in handlers: `Extension(CurrentAccount(account)): Extension<CurrentAccount>`
#[derive(Clone, Debug)]
pub struct CurrentAccount(pub Account);

fn extract_bearer(auth_header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(token)
}

/// Bearer token authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let token = match extract_bearer(&auth_header) {
        Ok(token) => token,
        Err(e) => return auth_error_response(e),
    };

    match resolve_principal(token, &auth_state.jwt_config, auth_state.accounts.as_ref()).await {
        Ok(account) => {
            request.extensions_mut().insert(CurrentAccount(account));
            next.run(request).await
        }
        Err(e) => auth_error_response(e),
    }
}

/// Admin/superadmin gate. Requires `auth_middleware` to have run first.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let Some(CurrentAccount(account)) = request.extensions().get::<CurrentAccount>() else {
        return auth_error_response(AuthError::MissingToken);
    };

    if let Err(e) = require_administrator(account) {
        warn!(user_id = account.id, role = %account.role_name(), "Admin route refused");
        return auth_error_response(e);
    }

    next.run(request).await
}

/// Render an authentication failure as `{detail}`
pub fn auth_error_response(error: AuthError) -> Response {
    let status = match &error {
        AuthError::MissingToken
        | AuthError::InvalidToken
        | AuthError::TokenExpired
        | AuthError::InactiveOrInvalid => StatusCode::UNAUTHORIZED,
        AuthError::Forbidden => StatusCode::FORBIDDEN,
        AuthError::Misconfigured(_) | AuthError::Storage(_) => {
            error!("Authentication failed internally: {}", error);
            return detail_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    detail_response(status, error.to_string())
}
