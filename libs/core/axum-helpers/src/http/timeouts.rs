use std::time::Duration;

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use core_config::server::ServerConfig;

use crate::errors::{ErrorCode, error_response};

/// Largest request body accepted, matching axum's default `Json` limit.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Per-request time budgets, built from [`ServerConfig`].
#[derive(Clone, Copy, Debug)]
pub struct RequestTimeouts {
    /// Time allowed to receive the full request body.
    pub read: Duration,
    /// Time allowed for the handler to produce a response.
    pub write: Duration,
}

impl From<&ServerConfig> for RequestTimeouts {
    fn from(config: &ServerConfig) -> Self {
        Self {
            read: config.read_timeout(),
            write: config.write_timeout(),
        }
    }
}

/// Buffers the request body under the read budget, then runs the handler under the write budget.
///
/// A slow client gets `408 REQUEST_TIMEOUT`; a slow handler is dropped, which cancels any
/// in-flight database call, and the client gets `503 SERVICE_UNAVAILABLE`.
pub async fn enforce_timeouts(
    State(timeouts): State<RequestTimeouts>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match tokio::time::timeout(timeouts.read, to_bytes(body, MAX_BODY_BYTES)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "failed to read request body");
            return error_response(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
            );
        }
        Err(_) => {
            tracing::warn!(timeout = ?timeouts.read, path = %parts.uri.path(), "request body read timed out");
            return error_response(
                ErrorCode::RequestTimeout,
                ErrorCode::RequestTimeout.default_message(),
            );
        }
    };

    let path = parts.uri.path().to_owned();
    let request = Request::from_parts(parts, Body::from(bytes));

    match tokio::time::timeout(timeouts.write, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!(timeout = ?timeouts.write, path = %path, "handler exceeded write timeout");
            error_response(
                ErrorCode::ServiceUnavailable,
                ErrorCode::ServiceUnavailable.default_message(),
            )
        }
    }
}
