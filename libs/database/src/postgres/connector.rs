use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Connect using a PostgresConfig.
///
/// The pool is pinged once before it is handed out, so a misconfigured URL fails
/// at startup rather than on the first request.
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{PostgresConfig, connect_from_config};
///
/// let db = connect_from_config(PostgresConfig::from_env()?).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );
    connect_with_options(config.into_connect_options()).await
}

/// Connect with custom connection options.
pub async fn connect_with_options(options: ConnectOptions) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    db.ping()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(format!("ping failed: {e}")))?;

    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}
