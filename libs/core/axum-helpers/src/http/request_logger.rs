use axum::{extract::Request, middleware::Next, response::Response};

/// Logs every failed response at `warn` with its status, method, and path.
///
/// Successful responses are already covered by the trace layer's INFO span events.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            status = status.as_u16(),
            method = %method,
            path = %path,
            "request failed"
        );
    }

    response
}
