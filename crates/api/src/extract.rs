//! Request extractors whose rejections render as [`AppError`] JSON.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use studionova_core::error::CoreError;

use crate::error::AppError;

/// JSON body extractor that falls back to `T::default()` when the body is
/// empty or is not JSON at all.
///
/// Well-formed JSON that does not fit `T` (e.g. a string where a number is
/// expected) is a validation error naming the offending field. Content type
/// is not checked.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;

        if bytes.is_empty() {
            return Ok(LenientJson(T::default()));
        }

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(LenientJson(value)),
            Err(JsonRejection::JsonSyntaxError(e)) => {
                tracing::debug!(error = %e.body_text(), "Ignoring unparseable request body");
                Ok(LenientJson(T::default()))
            }
            Err(JsonRejection::JsonDataError(e)) => {
                Err(AppError::Core(CoreError::Validation(e.body_text())))
            }
            Err(other) => Err(AppError::BadRequest(other.body_text())),
        }
    }
}

/// [`Path`] with a JSON error body on rejection.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

/// [`Query`] with a JSON error body on rejection.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}
