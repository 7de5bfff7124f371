use std::sync::Arc;

use crate::error::UserResult;
use crate::models::UserDto;
use crate::repository::UserRepository;
use crate::value_objects::UserId;

/// Looks up one user by its textual id.
#[derive(Clone)]
pub struct GetUser {
    repository: Arc<dyn UserRepository>,
}

impl GetUser {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> UserResult<UserDto> {
        let id = UserId::parse(id)?;
        let user = self.repository.find_by_id(&id).await?;
        Ok(user.into())
    }
}
