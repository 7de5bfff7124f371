//! Application-layer operations, one per user-facing action.
//!
//! Each use case holds only its repository handle. Locking and transactions belong to the store.

mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod update_user;

pub use create_user::{CreateUser, CreateUserInput};
pub use delete_user::DeleteUser;
pub use get_user::GetUser;
pub use list_users::ListUsers;
pub use update_user::{UpdateUser, UpdateUserInput};

use std::sync::Arc;

use crate::error::ValidationError;
use crate::repository::UserRepository;
use crate::value_objects::{Email, UserName};

/// All user use cases sharing one repository. Cheap to clone, used as router state.
#[derive(Clone)]
pub struct UserUseCases {
    pub create: CreateUser,
    pub get: GetUser,
    pub list: ListUsers,
    pub update: UpdateUser,
    pub delete: DeleteUser,
}

impl UserUseCases {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            create: CreateUser::new(repository.clone()),
            get: GetUser::new(repository.clone()),
            list: ListUsers::new(repository.clone()),
            update: UpdateUser::new(repository.clone()),
            delete: DeleteUser::new(repository),
        }
    }
}

/// Build both value objects, collecting every failure in field order.
fn validate_fields(name: &str, email: &str) -> Result<(UserName, Email), ValidationError> {
    let mut errors = ValidationError::new();

    let name = UserName::new(name)
        .map_err(|e| errors.push(e.to_field_error("name")))
        .ok();
    let email = Email::new(email)
        .map_err(|e| errors.push(e.to_field_error("email")))
        .ok();

    match (name, email) {
        (Some(name), Some(email)) => Ok((name, email)),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields_accepts_valid_input() {
        let (name, email) = validate_fields("Alice", "alice@example.com").unwrap();
        assert_eq!(name.as_str(), "Alice");
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_validate_fields_collects_name_then_email() {
        let err = validate_fields("", "invalid").unwrap_err();
        let fields: Vec<_> = err
            .errors()
            .iter()
            .map(|e| (e.field.as_str(), e.code.as_str()))
            .collect();
        assert_eq!(fields, [("name", "required"), ("email", "invalid_format")]);
    }

    #[test]
    fn test_validate_fields_single_failure() {
        let err = validate_fields(&"a".repeat(101), "alice@example.com").unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.to_string(), "name must be 100 characters or less");
    }
}
