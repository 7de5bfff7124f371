//! Shared application state.

use database::postgres::DatabaseConnection;
use domain_users::UserUseCases;

/// Cloned into every handler. All fields are cheap `Arc`-backed clones.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool, also probed by `/ready`
    pub db: DatabaseConnection,
    pub users: UserUseCases,
}
