use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{DomainError, UserResult};
use crate::models::User;
use crate::value_objects::UserId;

/// Entity name used in domain errors raised by repositories.
pub const USER_ENTITY: &str = "user";

/// Persistence contract for users.
///
/// Absence is always an explicit `NotFound` error, never an empty `Ok`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update by id. A duplicate email is a `Conflict`.
    async fn save(&self, user: &User) -> UserResult<()>;

    /// Fetch one user, or `NotFound`.
    async fn find_by_id(&self, id: &UserId) -> UserResult<User>;

    /// All users, oldest first.
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Remove one user, or `NotFound` if there was nothing to remove.
    async fn delete(&self, id: &UserId) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> UserResult<()> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|u| u.id() != user.id() && u.email() == user.email());
        if email_taken {
            return Err(DomainError::conflict(
                USER_ENTITY,
                "Save",
                format!("email {} is already registered", user.email()),
            )
            .into());
        }

        users.insert(*user.id(), user.clone());

        tracing::info!(user_id = %user.id(), "Saved user");
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> UserResult<User> {
        let users = self.users.read().await;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(USER_ENTITY, "FindByID").into())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(all)
    }

    async fn delete(&self, id: &UserId) -> UserResult<()> {
        let mut users = self.users.write().await;
        if users.remove(id).is_none() {
            return Err(DomainError::not_found(USER_ENTITY, "Delete").into());
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
