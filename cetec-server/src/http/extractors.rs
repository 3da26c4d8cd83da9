//! Custom Axum extractors
//!
//! Rejections map straight onto `ApiError`, so a bad path or body gets the
//! same JSON error shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Person id from the `{person_id}` path segment.
///
/// An id that isn't an integer can't match a row, so it is a 404 rather
/// than a 400.
pub struct PersonId(pub i64);

impl<S> FromRequestParts<S> for PersonId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        raw.trim().parse().map(Self).map_err(|_| {
            tracing::debug!(person_id = %raw, "malformed person id");
            ApiError::NotFound
        })
    }
}

/// JSON request body; any rejection is `Invalid input data`.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "rejected request body");
            ApiError::InvalidInput
        })?;

        Ok(Self(value))
    }
}
