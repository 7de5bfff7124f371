//! Server infrastructure: router assembly, health and readiness, graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &server_config);
//! create_production_app(router, &server_config, Duration::from_secs(30), async move {
//!     db.close().await.ok();
//! })
//! .await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, serve};
pub use health::{HealthCheckFuture, HealthResponse, health_handler, run_health_checks};
pub use shutdown::ShutdownCoordinator;
