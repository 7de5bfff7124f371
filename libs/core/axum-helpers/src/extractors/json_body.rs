//! JSON body extractor whose rejection uses the standard error envelope.

use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{FromRequest, Json, Request},
    response::Response,
};
use serde::de::DeserializeOwned;

/// JSON extractor that turns every decoding failure into
/// `400 {"error":{"code":"VALIDATION_ERROR","message":"invalid input"}}`.
///
/// Axum's own `Json` answers missing content types, syntax errors, and type
/// mismatches with different statuses and plain-text bodies. Handlers using
/// this extractor present a single malformed-input contract instead.
///
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<CreateRequest>) -> impl IntoResponse { /* ... */ }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "rejected request body");
            error_response(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
            )
        })?;

        Ok(JsonBody(data))
    }
}
