//! Database connectivity layer.
//!
//! Provides PostgreSQL (SeaORM) connection management with retry support,
//! health checks, and a thin generic repository over SeaORM entities.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support via SeaORM
//! - `config` - Environment-based configuration via `core_config`

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "postgres")]
pub use repository::BaseRepository;
