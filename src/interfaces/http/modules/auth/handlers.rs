//! Authentication API handlers

use axum::{extract::State, Json};

use super::dto::{LoginData, LoginRequest};
use crate::interfaces::http::common::{ApiEnvelope, ApiError, DetailBody, EmptyData, ValidatedJson};
use crate::interfaces::http::SharedAccountService;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub service: SharedAccountService,
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiEnvelope<LoginData>),
        (status = 401, description = "Invalid credentials", body = ApiEnvelope<EmptyData>),
        (status = 403, description = "Inactive user", body = ApiEnvelope<EmptyData>),
        (status = 422, description = "Malformed body", body = DetailBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiEnvelope<LoginData>>, ApiError> {
    let result = state.service.login(&request.email, &request.password).await?;

    Ok(Json(ApiEnvelope::ok(
        "Login successful",
        LoginData {
            access_token: result.access_token,
            user_name: result.account.name.clone(),
            user_role: result.account.role_name().to_string(),
            user_language: result.account.language_code().to_string(),
        },
    )))
}
