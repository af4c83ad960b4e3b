use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health.
///
/// Executes a `SELECT 1` to verify the connection is alive. Suitable for
/// Kubernetes readiness and liveness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Check PostgreSQL database health with a custom query.
///
/// Useful when the probe should verify specific database state, e.g.
/// `SELECT 1 FROM roles LIMIT 1`.
pub async fn check_health_with_query(
    db: &DatabaseConnection,
    query: &str,
) -> Result<(), DatabaseError> {
    debug!(
        "Running PostgreSQL health check with custom query: {}",
        query
    );

    let stmt = Statement::from_string(DatabaseBackend::Postgres, query.to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!(
            "PostgreSQL health check failed with query '{}': {}",
            query, e
        ))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Health check result for detailed status reporting
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,

    /// Optional error message if unhealthy
    pub message: Option<String>,

    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            response_time_ms,
        }
    }
}

/// Check PostgreSQL database health with timing information.
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = std::time::Instant::now();

    match check_health(db).await {
        Ok(_) => {
            let elapsed = start.elapsed().as_millis() as u64;
            HealthStatus::healthy(elapsed)
        }
        Err(e) => {
            let elapsed = start.elapsed().as_millis() as u64;
            HealthStatus::unhealthy(e.to_string(), elapsed)
        }
    }
}
