use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health with `SELECT 1`.
///
/// Backs the service readiness probe.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, RuntimeErr, Value};
    use std::collections::BTreeMap;

    fn select_one_row() -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("?column?", Value::Int(Some(1)))])
    }

    #[tokio::test]
    async fn test_check_health_passes_when_query_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![select_one_row()]])
            .into_connection();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_fails_when_query_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "connection reset".to_string(),
            ))])
            .into_connection();

        let err = check_health(&db).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
