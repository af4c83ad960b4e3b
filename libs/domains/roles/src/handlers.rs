use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RoleResult;
use crate::models::{CreateRole, Role, UpdateRole};
use crate::repository::RoleRepository;
use crate::service::RoleService;

const TAG: &str = "roles";

/// OpenAPI documentation for Roles API
#[derive(OpenApi)]
#[openapi(
    paths(list_roles, create_role, get_role, update_role, delete_role),
    components(
        schemas(Role, CreateRole, UpdateRole),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Role management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the role router with all HTTP endpoints
pub fn router<R: RoleRepository + 'static>(service: RoleService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route(
            "/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .with_state(shared_service)
}

/// List all roles
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of roles", body = Vec<Role>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_roles<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
) -> RoleResult<Json<Vec<Role>>> {
    let roles = service.list_roles().await?;
    Ok(Json(roles))
}

/// Create a new role
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created successfully", body = Role),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateRole>,
) -> RoleResult<impl IntoResponse> {
    let role = service.create_role(input).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Get a role by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role found", body = Role),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    Path(id): Path<i32>,
) -> RoleResult<Json<Role>> {
    let role = service.get_role(id).await?;
    Ok(Json(role))
}

/// Update a role
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Role ID")
    ),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated successfully", body = Role),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UpdateRole>,
) -> RoleResult<Json<Role>> {
    let role = service.update_role(id, input).await?;
    Ok(Json(role))
}

/// Delete a role
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Role ID")
    ),
    responses(
        (status = 204, description = "Role deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    Path(id): Path<i32>,
) -> RoleResult<impl IntoResponse> {
    service.delete_role(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
