//! Unified error types for database operations.

use thiserror::Error;

/// Database operation errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
