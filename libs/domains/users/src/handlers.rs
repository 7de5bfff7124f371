use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{ErrorCode, ErrorResponse, FieldErrorDetail, JsonBody};
use utoipa::OpenApi;

use crate::error::{ErrorKind, FieldError, UserError, UserResult};
use crate::models::{UserDto, UserRequest, UserResponse, UsersResponse};
use crate::usecases::{CreateUserInput, UpdateUserInput, UserUseCases};

/// Mount point of [`router`].
pub const USERS_URL: &str = "/users";

/// OpenAPI tag for the user endpoints.
pub const USERS_TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(UserDto, UserRequest, UserResponse, UsersResponse, ErrorResponse)),
    tags(
        (name = USERS_TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router. Nest it under [`USERS_URL`].
pub fn router(use_cases: UserUseCases) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(use_cases)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "All users, oldest first", body = UsersResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn list_users(State(use_cases): State<UserUseCases>) -> UserResult<Json<UsersResponse>> {
    let users = use_cases.list.execute().await?;
    Ok(Json(UsersResponse { users }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = USERS_TAG,
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body or invalid fields", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn create_user(
    State(use_cases): State<UserUseCases>,
    JsonBody(request): JsonBody<UserRequest>,
) -> UserResult<impl IntoResponse> {
    let user = use_cases
        .create
        .execute(CreateUserInput {
            name: request.name,
            email: request.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn get_user(
    State(use_cases): State<UserUseCases>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = use_cases.get.execute(&id).await?;
    Ok(Json(UserResponse { user }))
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed ID, body or fields", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn update_user(
    State(use_cases): State<UserUseCases>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UserRequest>,
) -> UserResult<Json<UserResponse>> {
    let user = use_cases
        .update
        .execute(
            &id,
            UpdateUserInput {
                name: request.name,
                email: request.email,
            },
        )
        .await?;

    Ok(Json(UserResponse { user }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn delete_user(
    State(use_cases): State<UserUseCases>,
    Path(id): Path<String>,
) -> UserResult<StatusCode> {
    use_cases.delete.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::Conflict => ErrorCode::Conflict,
            ErrorKind::InvalidInput => ErrorCode::ValidationError,
            ErrorKind::Unauthorized => ErrorCode::Unauthorized,
            ErrorKind::Forbidden => ErrorCode::Forbidden,
            ErrorKind::Internal => ErrorCode::InternalError,
        }
    }
}

impl From<&FieldError> for FieldErrorDetail {
    fn from(e: &FieldError) -> Self {
        Self {
            field: e.field.clone(),
            code: e.code.clone(),
            message: e.message.clone(),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let code = ErrorCode::from(self.kind());

        if code.status().is_server_error() {
            tracing::error!(error = ?self, "request failed: {self}");
            return ErrorResponse::new(code, code.default_message()).into_response();
        }

        let response = ErrorResponse::new(code, self.to_string());
        match &self {
            UserError::Validation(v) => response
                .with_details(v.errors().iter().map(FieldErrorDetail::from).collect())
                .into_response(),
            _ => response.into_response(),
        }
    }
}
