//! HTTP middleware shared by every service router.
//!
//! ```ignore
//! use axum_helpers::http::{RequestTimeouts, enforce_timeouts, request_logger};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn_with_state(RequestTimeouts::from(&config), enforce_timeouts))
//!     .layer(axum::middleware::from_fn(request_logger));
//! ```

pub mod request_logger;
pub mod timeouts;

pub use request_logger::request_logger;
pub use timeouts::{MAX_BODY_BYTES, RequestTimeouts, enforce_timeouts};
