use std::sync::Arc;

use crate::error::UserResult;
use crate::models::UserDto;
use crate::repository::UserRepository;

/// Returns every user, oldest first.
#[derive(Clone)]
pub struct ListUsers {
    repository: Arc<dyn UserRepository>,
}

impl ListUsers {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UserResult<Vec<UserDto>> {
        let users = self.repository.find_all().await?;
        Ok(users.iter().map(UserDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, UserError};
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use crate::value_objects::{Email, UserName};

    #[tokio::test]
    async fn test_list_maps_every_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_all().returning(|| {
            Ok(vec![User::new(
                UserName::new("test").unwrap(),
                Email::new("test@example.com").unwrap(),
            )])
        });

        let use_case = ListUsers::new(Arc::new(mock_repo));
        let users = use_case.execute().await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "test");
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_list() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(Vec::new()));

        let use_case = ListUsers::new(Arc::new(mock_repo));

        assert!(use_case.execute().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_failure_is_internal() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(UserError::Database(sea_orm::DbErr::Custom("db error".into()))));

        let use_case = ListUsers::new(Arc::new(mock_repo));
        let err = use_case.execute().await.unwrap_err();

        assert!(err.is(ErrorKind::Internal));
    }
}
