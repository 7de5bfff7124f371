//! PostgreSQL connection management and health checks.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, connect_with_options};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
