use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Role {0} does not exist")]
    UnknownRole(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Admin role required for the high-risk report")]
    ReportForbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::DuplicateUsername(username) => {
                AppError::Conflict(format!("Username '{}' is already taken", username))
            }
            UserError::UnknownRole(id) => {
                AppError::BadRequest(format!("Role {} does not exist", id))
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::ReportForbidden => {
                AppError::Forbidden("Admin role required for the high-risk report".to_string())
            }
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
