//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{AccountPatch, ExampleCredentials, PatchOutcome};

/// Self-service language change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnLanguageRequest {
    #[schema(example = "es")]
    pub language_code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetLanguageRequest {
    /// Language code, case-insensitive
    #[schema(example = "FR")]
    pub language: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetRoleRequest {
    /// Role name, case-insensitive
    #[schema(example = "admin")]
    pub role: String,
}

/// Partial admin update. Only `language`, `role` and `is_active` are accepted;
/// null counts as absent.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PatchUserRequest {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<PatchUserRequest> for AccountPatch {
    fn from(r: PatchUserRequest) -> Self {
        Self {
            is_active: r.is_active,
            language: r.language,
            role: r.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnLanguageData {
    pub user_language: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserActiveData {
    pub user_id: i32,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserLanguageData {
    pub user_id: i32,
    pub user_language: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRoleData {
    pub user_id: i32,
    pub user_role: String,
}

/// Snapshot returned by a partial update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatchedUserData {
    pub user_id: i32,
    pub user_role: String,
    pub user_language: String,
    pub is_active: bool,
    pub updated_fields: Vec<String>,
}

impl From<PatchOutcome> for PatchedUserData {
    fn from(o: PatchOutcome) -> Self {
        Self {
            user_id: o.account.id,
            user_role: o.account.role_name().to_string(),
            user_language: o.account.language_code().to_string(),
            is_active: o.account.is_active,
            updated_fields: o.updated_fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Demo account listed by `/users/examples`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExampleUserDto {
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
    pub user_language: String,
    pub user_role: String,
    pub user_active: bool,
}

impl From<ExampleCredentials> for ExampleUserDto {
    fn from(e: ExampleCredentials) -> Self {
        Self {
            user_id: e.account.id,
            user_language: e.account.language_code().to_string(),
            user_role: e.account.role_name().to_string(),
            user_name: e.account.name,
            user_email: e.account.email,
            user_password: e.password.to_string(),
            user_active: e.account.is_active,
        }
    }
}
