use std::sync::Arc;

use crate::error::UserResult;
use crate::repository::UserRepository;
use crate::value_objects::UserId;

/// Removes an existing user.
#[derive(Clone)]
pub struct DeleteUser {
    repository: Arc<dyn UserRepository>,
}

impl DeleteUser {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> UserResult<()> {
        let id = UserId::parse(id)?;

        self.repository
            .find_by_id(&id)
            .await
            .map_err(|e| e.context("DeleteUser"))?;

        self.repository.delete(&id).await
    }
}
