use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{User, UserDto};
use crate::repository::UserRepository;

use super::validate_fields;

#[derive(Debug, Clone, Default)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
}

/// Registers a new user.
#[derive(Clone)]
pub struct CreateUser {
    repository: Arc<dyn UserRepository>,
}

impl CreateUser {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, input: CreateUserInput) -> UserResult<UserDto> {
        let (name, email) = validate_fields(&input.name, &input.email)?;

        let user = User::new(name, email);
        self.repository.save(&user).await?;

        Ok(user.into())
    }
}
