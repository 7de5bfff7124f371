//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service's Axum applications.
//!
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown
//! - **[`http`]**: request logging and timeout middleware
//! - **[`errors`]**: the `{"error":{...}}` envelope and its error codes
//! - **[`extractors`]**: JSON body extractor with envelope-shaped rejections
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config);
//! create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{ErrorBody, ErrorCode, ErrorResponse, FieldErrorDetail, error_response};
pub use extractors::JsonBody;
pub use http::{RequestTimeouts, enforce_timeouts, request_logger};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_handler, run_health_checks,
};
