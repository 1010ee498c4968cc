//! Numeric path parameter with a `{detail}` rejection

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;

use super::detail_response;

/// Account id taken from a `/{id}` path segment.
///
/// A non-numeric segment is a 422 `{detail}`, like any other malformed input.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub i32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                detail_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            })?;
        Ok(PathId(id))
    }
}
