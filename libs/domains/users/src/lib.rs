//! Users Domain
//!
//! CRUD for a single `User` resource, layered so each concern can be tested on its own.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, error kind → status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Use cases  │  ← Create / Get / List / Update / Delete
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait, Postgres and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User entity, value objects, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use domain_users::{InMemoryUserRepository, UserUseCases, handlers};
//!
//! let use_cases = UserUseCases::new(Arc::new(InMemoryUserRepository::new()));
//! let app: Router = Router::new().nest(handlers::USERS_URL, handlers::router(use_cases));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod usecases;
pub mod value_objects;

pub use error::{DomainError, ErrorKind, FieldError, UserError, UserResult, ValidationError, is_kind};
pub use handlers::ApiDoc;
pub use models::{User, UserDto, UserRequest, UserResponse, UsersResponse};
pub use postgres::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use usecases::UserUseCases;
pub use value_objects::{Email, UserId, UserName, ValueError};
