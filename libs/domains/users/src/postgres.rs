use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, SqlErr, Statement};
use uuid::Uuid;

use crate::error::{DomainError, UserError, UserResult};
use crate::models::User;
use crate::repository::{USER_ENTITY, UserRepository};
use crate::value_objects::{Email, UserId, UserName, ValueError};

/// Schema this repository expects, applied by deployment tooling and integration tests.
pub const SCHEMA_SQL: &str = include_str!("../sql/users.sql");

const UPSERT_USER: &str = r#"
    INSERT INTO users (id, name, email, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (id) DO UPDATE
    SET name = EXCLUDED.name,
        email = EXCLUDED.email,
        updated_at = EXCLUDED.updated_at
"#;

const SELECT_USER_BY_ID: &str =
    "SELECT id, name, email, created_at, updated_at FROM users WHERE id = $1";

const SELECT_ALL_USERS: &str =
    "SELECT id, name, email, created_at, updated_at FROM users ORDER BY created_at, id";

const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = ValueError;

    /// Stored values go back through the value-object constructors.
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::reconstruct(
            UserId::from_uuid(row.id),
            UserName::new(row.name)?,
            Email::new(row.email)?,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// SQLSTATE 23505. Mock and proxy connections only carry the driver message, so fall back to it.
fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err
            .to_string()
            .contains("duplicate key value violates unique constraint")
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> UserResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPSERT_USER,
            [
                (*user.id().as_uuid()).into(),
                user.name().as_str().into(),
                user.email().as_str().into(),
                user.created_at().into(),
                user.updated_at().into(),
            ],
        );

        self.db.execute_raw(stmt).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::from(DomainError::conflict(USER_ENTITY, "Save", e))
            } else {
                UserError::from(e)
            }
        })?;

        tracing::info!(user_id = %user.id(), "Saved user");
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> UserResult<User> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_USER_BY_ID,
            [(*id.as_uuid()).into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found(USER_ENTITY, "FindByID"))?;

        Ok(User::try_from(row)?)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let stmt = Statement::from_string(DbBackend::Postgres, SELECT_ALL_USERS);

        let rows = UserRow::find_by_statement(stmt).all(&self.db).await?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(UserError::from))
            .collect()
    }

    async fn delete(&self, id: &UserId) -> UserResult<()> {
        let stmt =
            Statement::from_sql_and_values(DbBackend::Postgres, DELETE_USER, [(*id.as_uuid()).into()]);

        let result = self.db.execute_raw(stmt).await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(USER_ENTITY, "Delete").into());
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
