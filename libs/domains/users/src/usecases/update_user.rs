use std::sync::Arc;

use crate::error::UserResult;
use crate::models::UserDto;
use crate::repository::UserRepository;
use crate::value_objects::UserId;

use super::validate_fields;

#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: String,
    pub email: String,
}

/// Replaces the name and email of an existing user.
#[derive(Clone)]
pub struct UpdateUser {
    repository: Arc<dyn UserRepository>,
}

impl UpdateUser {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Input is validated before the lookup, so a bad body on a missing user is still a 400.
    pub async fn execute(&self, id: &str, input: UpdateUserInput) -> UserResult<UserDto> {
        let id = UserId::parse(id)?;
        let (name, email) = validate_fields(&input.name, &input.email)?;

        let mut user = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(|e| e.context("UpdateUser"))?;

        user.change_name(name);
        user.change_email(email);
        self.repository.save(&user).await?;

        Ok(user.into())
    }
}
