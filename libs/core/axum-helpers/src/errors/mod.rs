pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error envelope returned for every failed request.
///
/// ```json
/// {
///   "error": {
///     "code": "VALIDATION_ERROR",
///     "message": "name is required",
///     "details": [{ "field": "name", "code": "required", "message": "name is required" }]
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error identifier
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation failures, present only for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorDetail>>,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorDetail {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: Vec<FieldErrorDetail>) -> Self {
        self.error.details = Some(details);
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.error.code.status(), Json(self)).into_response()
    }
}

/// Build an error response with the status implied by `code`.
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> Response {
    ErrorResponse::new(code, message).into_response()
}
