//! Response envelope and error rendering
//!
//! Business outcomes use `{success, message, data}`. Failures that happen
//! before business logic (authentication, malformed bodies) use `{detail}`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard business response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl ApiEnvelope<EmptyData> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: EmptyData {},
        }
    }
}

/// Serialises as `{}`
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Bare error body used outside the business envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DetailBody {
    pub detail: String,
}

/// `{detail}` response. 401s carry `WWW-Authenticate: Bearer`.
pub fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    let mut response = (
        status,
        Json(DetailBody {
            detail: detail.into(),
        }),
    )
        .into_response();

    if status == StatusCode::UNAUTHORIZED {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    response
}

/// Business failure rendered as an envelope with `data: {}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        if e.is_internal() {
            error!("Request failed: {}", e);
            return Self::internal();
        }

        let status = match &e {
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::InactiveAccount => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::EmptyPayload | DomainError::InvalidFieldValue(_) => StatusCode::BAD_REQUEST,
            DomainError::Storage(_) | DomainError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiEnvelope::failure(self.message))).into_response()
    }
}
