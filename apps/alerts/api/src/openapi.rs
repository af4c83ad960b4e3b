use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Alerts API",
        version = "0.1.0",
        description = "API for managing roles, users, and high-risk-zone reports"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/roles", api = domain_roles::handlers::ApiDoc),
        (path = "/users", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
