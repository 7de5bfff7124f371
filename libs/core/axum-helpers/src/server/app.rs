use super::health::health_handler;
use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{handle_panic, method_not_allowed, not_found};
use crate::http::{RequestTimeouts, enforce_timeouts, request_logger};
use axum::{Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Combines domain routes with the cross-cutting pieces every service gets:
///
/// - `GET /health` liveness probe
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
/// - JSON 404 and 405 fallbacks
/// - read/write timeouts from `server_config`
/// - panic recovery into an opaque 500
/// - `warn!` logging of failed responses inside a per-request trace span
///
/// `apis` must already have its state applied.
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .route("/health", get(health_handler))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(
            RequestTimeouts::from(server_config),
            enforce_timeouts,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_logger))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Binds the configured address and serves until SIGINT or SIGTERM.
///
/// In-flight requests get `shutdown_timeout` to drain, then `cleanup` (closing the
/// database pool, for instance) gets the same budget.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    // idle_timeout is informational: axum::serve exposes no keep-alive idle setting.
    info!(
        address = %listener.local_addr()?,
        read_timeout = ?server_config.read_timeout(),
        write_timeout = ?server_config.write_timeout(),
        idle_timeout = ?server_config.idle_timeout(),
        "Server starting"
    );

    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    serve(listener, router, coordinator, shutdown_timeout, cleanup).await
}

/// Serves `router` on `listener` until `coordinator` signals shutdown, then runs `cleanup`.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let graceful = coordinator.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { graceful.wait_for_shutdown().await })
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async {
        coordinator.wait_for_shutdown().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    let serve_result = tokio::select! {
        result = &mut server => result.inspect_err(|e| {
            tracing::error!(error = ?e, "Server encountered an error");
        }),
        _ = drain_deadline => {
            warn!(?shutdown_timeout, "In-flight requests exceeded shutdown timeout, dropping connections");
            Ok(())
        }
    };

    info!(?shutdown_timeout, "Running cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(?shutdown_timeout, "Cleanup exceeded timeout, forcing shutdown"),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(paths(crate::server::health::health_handler))]
    struct TestDoc;

    async fn panics() -> &'static str {
        panic!("boom")
    }

    fn app() -> Router {
        let apis = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/panic", get(panics));
        create_router::<TestDoc>(apis, &ServerConfig::default())
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_unknown_route_uses_error_envelope() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_wrong_method_uses_error_envelope() {
        let response = app()
            .oneshot(Request::delete("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json(response).await["error"]["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let response = app()
            .oneshot(Request::get("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json(response).await,
            serde_json::json!({
                "error": {"code": "INTERNAL_ERROR", "message": "internal server error"}
            })
        );
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json(response).await["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn test_serve_runs_cleanup_after_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let coordinator = ShutdownCoordinator::new();
        let cleaned = Arc::new(AtomicBool::new(false));

        let flag = cleaned.clone();
        let server = tokio::spawn(serve(
            listener,
            app(),
            coordinator.clone(),
            Duration::from_secs(1),
            async move { flag.store(true, Ordering::SeqCst) },
        ));

        coordinator.shutdown();
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server should stop")
            .unwrap();

        assert!(result.is_ok());
        assert!(cleaned.load(Ordering::SeqCst));
    }
}
