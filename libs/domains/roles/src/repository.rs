use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{RoleError, RoleResult};
use crate::models::{CreateRole, Role, UpdateRole};

/// Repository trait for Role persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Create a new role
    async fn create(&self, input: CreateRole) -> RoleResult<Role>;

    /// Get a role by ID
    async fn get_by_id(&self, id: i32) -> RoleResult<Option<Role>>;

    /// List all roles in id order
    async fn list(&self) -> RoleResult<Vec<Role>>;

    /// Update an existing role (full overwrite of mutable fields)
    async fn update(&self, id: i32, input: UpdateRole) -> RoleResult<Role>;

    /// Delete a role by ID
    async fn delete(&self, id: i32) -> RoleResult<bool>;
}

/// In-memory implementation of RoleRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<HashMap<i32, Role>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self {
            roles: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, input: CreateRole) -> RoleResult<Role> {
        let mut roles = self.roles.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let role = Role::new(id, input);
        roles.insert(role.id, role.clone());

        tracing::info!(role_id = role.id, "Created role");
        Ok(role)
    }

    async fn get_by_id(&self, id: i32) -> RoleResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(&id).cloned())
    }

    async fn list(&self) -> RoleResult<Vec<Role>> {
        let roles = self.roles.read().await;

        let mut result: Vec<Role> = roles.values().cloned().collect();
        result.sort_by_key(|r| r.id);

        Ok(result)
    }

    async fn update(&self, id: i32, input: UpdateRole) -> RoleResult<Role> {
        let mut roles = self.roles.write().await;

        let role = roles.get_mut(&id).ok_or(RoleError::NotFound(id))?;
        role.apply_update(input);
        let updated = role.clone();

        tracing::info!(role_id = id, "Updated role");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> RoleResult<bool> {
        let mut roles = self.roles.write().await;

        if roles.remove(&id).is_some() {
            tracing::info!(role_id = id, "Deleted role");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
