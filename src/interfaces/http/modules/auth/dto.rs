//! Auth DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login identifier
    #[validate(email)]
    #[schema(example = "admin@example.net")]
    pub email: String,
    #[schema(example = "adminPassword")]
    pub password: String,
}

/// Login response data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginData {
    /// Bearer token for the `Authorization` header
    pub access_token: String,
    pub user_name: String,
    pub user_role: String,
    pub user_language: String,
}
