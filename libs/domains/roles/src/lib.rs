//! Roles Domain
//!
//! This module provides a complete domain implementation for managing user roles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_roles::{
//!     handlers,
//!     repository::InMemoryRoleRepository,
//!     service::RoleService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryRoleRepository::new();
//! let service = RoleService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{RoleError, RoleResult};
pub use models::{CreateRole, Role, UpdateRole};
pub use postgres::PgRoleRepository;
pub use repository::{InMemoryRoleRepository, RoleRepository};
pub use service::RoleService;
