use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(axum_helpers::server::health::health_handler),
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Users API",
        version = "0.1.0",
        description = "CRUD service for user accounts"
    ),
    nest(
        (path = domain_users::handlers::USERS_URL, api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
