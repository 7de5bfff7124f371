use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::value_objects::{Email, UserId, UserName};

/// User entity. Fields are only reachable through accessors, and mutation only
/// accepts already-validated value objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// A brand-new user with a fresh id.
    pub fn new(name: UserName, email: Email) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user loaded from storage.
    pub fn reconstruct(
        id: UserId,
        name: UserName,
        email: Email,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn change_name(&mut self, name: UserName) {
        self.name = name;
        self.touch();
    }

    pub fn change_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    fn touch(&mut self) {
        // Never move backwards, even if the wall clock does.
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Missing fields decode as empty strings so they surface as `required` field errors.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserRequest {
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// `{"user": {...}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserDto,
}

/// `{"users": [...]}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new(
            UserName::new("Alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_user_has_matching_timestamps() {
        let user = alice();
        assert_eq!(user.created_at(), user.updated_at());
        assert_eq!(user.name().as_str(), "Alice");
        assert_eq!(user.email().as_str(), "alice@example.com");
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        assert_ne!(alice().id(), alice().id());
    }

    #[test]
    fn test_change_name_refreshes_updated_at() {
        let mut user = alice();
        let before = user.updated_at();
        user.change_name(UserName::new("Bob").unwrap());
        assert_eq!(user.name().as_str(), "Bob");
        assert!(user.updated_at() >= before);
        assert_eq!(user.created_at(), before);
    }

    #[test]
    fn test_change_email_refreshes_updated_at() {
        let mut user = alice();
        let created = user.created_at();
        user.change_email(Email::new("bob@example.com").unwrap());
        assert_eq!(user.email().as_str(), "bob@example.com");
        assert!(user.updated_at() >= created);
    }

    #[test]
    fn test_reconstruct_keeps_stored_values() {
        let id = UserId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let created = Utc::now() - chrono::Duration::days(1);
        let user = User::reconstruct(
            id,
            UserName::new("Alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            created,
            created,
        );
        assert_eq!(user.id(), &id);
        assert_eq!(user.created_at(), created);
    }

    #[test]
    fn test_dto_from_user() {
        let user = alice();
        let dto = UserDto::from(&user);
        assert_eq!(dto.id, user.id().to_string());
        assert_eq!(dto.name, "Alice");
        assert_eq!(dto.email, "alice@example.com");
        assert_eq!(
            serde_json::to_value(&dto).unwrap().as_object().unwrap().len(),
            3
        );
    }

    #[test]
    fn test_request_missing_fields_default_to_empty() {
        let req: UserRequest = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(req.name, "Alice");
        assert_eq!(req.email, "");
    }
}
