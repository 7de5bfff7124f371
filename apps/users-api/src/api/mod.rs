use axum::{Router, routing::get};

use crate::state::AppState;

pub mod health;

/// Domain routes, each sub-router with its state already applied.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest(
        domain_users::handlers::USERS_URL,
        domain_users::handlers::router(state.users.clone()),
    )
}

/// `/ready`, probing the database on every call.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
