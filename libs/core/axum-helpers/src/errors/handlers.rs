use std::any::Any;

use axum::response::Response;

use super::{ErrorCode, error_response};

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    error_response(ErrorCode::NotFound, "The requested resource was not found")
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(
        ErrorCode::MethodNotAllowed,
        "The HTTP method is not allowed for this resource",
    )
}

/// Converts a handler panic into an opaque 500, for use with `CatchPanicLayer::custom`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "handler panicked");
    error_response(ErrorCode::InternalError, ErrorCode::InternalError.default_message())
}
