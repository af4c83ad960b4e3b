use std::sync::Arc;
use validator::Validate;

use crate::error::{RoleError, RoleResult};
use crate::models::{CreateRole, Role, UpdateRole};
use crate::repository::RoleRepository;

/// Service layer for Role business logic
#[derive(Clone)]
pub struct RoleService<R: RoleRepository> {
    repository: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new role with validation
    pub async fn create_role(&self, input: CreateRole) -> RoleResult<Role> {
        input
            .validate()
            .map_err(|e| RoleError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a role by ID
    pub async fn get_role(&self, id: i32) -> RoleResult<Role> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(RoleError::NotFound(id))
    }

    /// List all roles
    pub async fn list_roles(&self) -> RoleResult<Vec<Role>> {
        self.repository.list().await
    }

    /// Update a role (full overwrite of mutable fields)
    pub async fn update_role(&self, id: i32, input: UpdateRole) -> RoleResult<Role> {
        input
            .validate()
            .map_err(|e| RoleError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a role
    pub async fn delete_role(&self, id: i32) -> RoleResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(RoleError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRoleRepository;

    #[tokio::test]
    async fn test_create_role_rejects_empty_name() {
        let mock_repo = MockRoleRepository::new();
        let service = RoleService::new(mock_repo);

        let result = service
            .create_role(CreateRole {
                name: String::new(),
                description: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(RoleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_role_delegates_to_repository() {
        let mut mock_repo = MockRoleRepository::new();

        mock_repo
            .expect_create()
            .returning(|input| Ok(Role::new(1, input)));

        let service = RoleService::new(mock_repo);
        let role = service
            .create_role(CreateRole {
                name: "auditor".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(role.id, 1);
        assert_eq!(role.name, "auditor");
    }

    #[tokio::test]
    async fn test_get_role_maps_missing_to_not_found() {
        let mut mock_repo = MockRoleRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(mockall::predicate::eq(7))
            .returning(|_| Ok(None));

        let service = RoleService::new(mock_repo);
        let result = service.get_role(7).await;

        assert!(matches!(result, Err(RoleError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_role_maps_false_to_not_found() {
        let mut mock_repo = MockRoleRepository::new();

        mock_repo
            .expect_delete()
            .with(mockall::predicate::eq(9))
            .returning(|_| Ok(false));

        let service = RoleService::new(mock_repo);
        let result = service.delete_role(9).await;

        assert!(matches!(result, Err(RoleError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_update_role_rejects_invalid_input() {
        let mock_repo = MockRoleRepository::new();
        let service = RoleService::new(mock_repo);

        let result = service
            .update_role(
                1,
                UpdateRole {
                    name: String::new(),
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(RoleError::Validation(_))));
    }
}
