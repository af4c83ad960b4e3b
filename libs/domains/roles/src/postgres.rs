use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, QueryOrder};

use crate::{
    entity,
    error::{RoleError, RoleResult},
    models::{CreateRole, Role, UpdateRole},
    repository::RoleRepository,
};

pub struct PgRoleRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// Map a database error, recognizing foreign-key violations on delete.
fn map_db_err(id: i32, e: sea_orm::DbErr) -> RoleError {
    let msg = e.to_string();
    if msg.contains("violates foreign key constraint") {
        RoleError::InUse(id)
    } else {
        RoleError::Internal(format!("Database error: {}", e))
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn create(&self, input: CreateRole) -> RoleResult<Role> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| RoleError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(role_id = model.id, "Created role");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> RoleResult<Option<Role>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| RoleError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> RoleResult<Vec<Role>> {
        use sea_orm::EntityTrait;

        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(|e| RoleError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i32, input: UpdateRole) -> RoleResult<Role> {
        // Fetch existing role
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| RoleError::Internal(format!("Database error: {}", e)))?
            .ok_or(RoleError::NotFound(id))?;

        let mut role: Role = model.into();
        role.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            description: Set(role.description.clone()),
        };

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| RoleError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(role_id = id, "Updated role");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i32) -> RoleResult<bool> {
        // Deleting a role still referenced by users trips the RESTRICT
        // foreign key; surface that as a conflict rather than cascading.
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| map_db_err(id, e))?;

        if rows_affected > 0 {
            tracing::info!(role_id = id, "Deleted role");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
