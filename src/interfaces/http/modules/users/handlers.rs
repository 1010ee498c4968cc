//! User management API handlers

use axum::{extract::State, Extension, Json};

use super::dto::*;
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiEnvelope, ApiError, DetailBody, EmptyData, PathId, ValidatedJson,
};
use crate::interfaces::http::middleware::CurrentAccount;
use crate::interfaces::http::SharedAccountService;

/// Users handler state
#[derive(Clone)]
pub struct UsersState {
    pub service: SharedAccountService,
}

#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    request_body = UpdateOwnLanguageRequest,
    responses(
        (status = 200, description = "Language updated", body = ApiEnvelope<OwnLanguageData>),
        (status = 400, description = "Language not found", body = ApiEnvelope<EmptyData>),
        (status = 401, description = "Missing, invalid or expired token", body = DetailBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_own_language(
    State(state): State<UsersState>,
    Extension(CurrentAccount(caller)): Extension<CurrentAccount>,
    ValidatedJson(request): ValidatedJson<UpdateOwnLanguageRequest>,
) -> Result<Json<ApiEnvelope<OwnLanguageData>>, ApiError> {
    let account = state
        .service
        .update_own_language(&caller, &request.language_code)
        .await
        .map_err(|e| match e {
            DomainError::NotFound("Language") | DomainError::InvalidFieldValue(_) => {
                ApiError::bad_request("Language not found")
            }
            e => ApiError::from(e),
        })?;

    Ok(Json(ApiEnvelope::ok(
        "User updated successfully",
        OwnLanguageData {
            user_language: account.language_code().to_string(),
        },
    )))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/active",
    tag = "Admin Users",
    params(("user_id" = i32, Path, description = "Target account id")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiEnvelope<UserActiveData>),
        (status = 404, description = "User not found", body = ApiEnvelope<EmptyData>),
        (status = 401, description = "Missing, invalid or expired token", body = DetailBody),
        (status = 403, description = "Admin or Superadmin privileges required", body = DetailBody),
        (status = 422, description = "Malformed body", body = DetailBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_user_active(
    State(state): State<UsersState>,
    PathId(user_id): PathId,
    ValidatedJson(request): ValidatedJson<SetActiveRequest>,
) -> Result<Json<ApiEnvelope<UserActiveData>>, ApiError> {
    let account = state.service.set_active(user_id, request.is_active).await?;

    Ok(Json(ApiEnvelope::ok(
        "User status updated successfully",
        UserActiveData {
            user_id: account.id,
            is_active: account.is_active,
        },
    )))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/language",
    tag = "Admin Users",
    params(("user_id" = i32, Path, description = "Target account id")),
    request_body = SetLanguageRequest,
    responses(
        (status = 200, description = "Language changed", body = ApiEnvelope<UserLanguageData>),
        (status = 404, description = "User or language not found", body = ApiEnvelope<EmptyData>),
        (status = 401, description = "Missing, invalid or expired token", body = DetailBody),
        (status = 403, description = "Admin or Superadmin privileges required", body = DetailBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_user_language(
    State(state): State<UsersState>,
    PathId(user_id): PathId,
    ValidatedJson(request): ValidatedJson<SetLanguageRequest>,
) -> Result<Json<ApiEnvelope<UserLanguageData>>, ApiError> {
    let account = state.service.set_language(user_id, &request.language).await?;

    Ok(Json(ApiEnvelope::ok(
        "User language updated successfully",
        UserLanguageData {
            user_id: account.id,
            user_language: account.language_code().to_string(),
        },
    )))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/role",
    tag = "Admin Users",
    params(("user_id" = i32, Path, description = "Target account id")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = ApiEnvelope<UserRoleData>),
        (status = 404, description = "User or role not found", body = ApiEnvelope<EmptyData>),
        (status = 401, description = "Missing, invalid or expired token", body = DetailBody),
        (status = 403, description = "Admin or Superadmin privileges required", body = DetailBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_user_role(
    State(state): State<UsersState>,
    PathId(user_id): PathId,
    ValidatedJson(request): ValidatedJson<SetRoleRequest>,
) -> Result<Json<ApiEnvelope<UserRoleData>>, ApiError> {
    let account = state.service.set_role(user_id, &request.role).await?;

    Ok(Json(ApiEnvelope::ok(
        "User role updated successfully",
        UserRoleData {
            user_id: account.id,
            user_role: account.role_name().to_string(),
        },
    )))
}

#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    tag = "Admin Users",
    params(("user_id" = i32, Path, description = "Target account id")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "User partially updated", body = ApiEnvelope<PatchedUserData>),
        (status = 400, description = "Empty payload or blank value", body = ApiEnvelope<EmptyData>),
        (status = 404, description = "User, language or role not found", body = ApiEnvelope<EmptyData>),
        (status = 401, description = "Missing, invalid or expired token", body = DetailBody),
        (status = 403, description = "Admin or Superadmin privileges required", body = DetailBody),
        (status = 422, description = "Unknown field or wrong type", body = DetailBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn patch_user(
    State(state): State<UsersState>,
    PathId(user_id): PathId,
    ValidatedJson(request): ValidatedJson<PatchUserRequest>,
) -> Result<Json<ApiEnvelope<PatchedUserData>>, ApiError> {
    let outcome = state.service.patch(user_id, request.into()).await?;

    Ok(Json(ApiEnvelope::ok("User partially updated", outcome.into())))
}

#[utoipa::path(
    get,
    path = "/users/examples",
    tag = "Users",
    responses(
        (status = 200, description = "Seeded demo accounts", body = ApiEnvelope<Vec<ExampleUserDto>>)
    )
)]
pub async fn list_example_users(
    State(state): State<UsersState>,
) -> Result<Json<ApiEnvelope<Vec<ExampleUserDto>>>, ApiError> {
    let examples = state.service.example_accounts().await?;

    Ok(Json(ApiEnvelope::ok(
        "Example users retrieved successfully",
        examples.into_iter().map(ExampleUserDto::from).collect(),
    )))
}
