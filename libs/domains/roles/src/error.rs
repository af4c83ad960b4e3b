use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Role not found: {0}")]
    NotFound(i32),

    #[error("Role {0} is still assigned to users")]
    InUse(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RoleResult<T> = Result<T, RoleError>;

/// Convert RoleError to AppError for standardized error responses
impl From<RoleError> for AppError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::NotFound(id) => AppError::NotFound(format!("Role {} not found", id)),
            RoleError::InUse(id) => {
                AppError::Conflict(format!("Role {} is still assigned to users", id))
            }
            RoleError::Validation(msg) => AppError::BadRequest(msg),
            RoleError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RoleError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
