//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - Database connection (PostgreSQL)
//! - JWT verifier for the admin-gated report route

use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
    /// JWT verifier for protected routes
    pub jwt_auth: JwtAuth,
}
