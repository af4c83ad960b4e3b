use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, HighRiskUser, RiskLevel, UpdateUser, User, UserSummary},
    repository::UserRepository,
};

pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// Map a write error, recognizing the unique-username index and the
/// role foreign key.
fn map_write_err(input_username: &str, role_id: i32, e: sea_orm::DbErr) -> UserError {
    let msg = e.to_string();
    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        UserError::DuplicateUsername(input_username.to_string())
    } else if msg.contains("violates foreign key constraint") {
        UserError::UnknownRole(role_id)
    } else {
        UserError::Internal(format!("Database error: {}", e))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        // Early rejection; the unique index below is the authoritative guard
        let exists = self.exists_by_username(&input.username).await?;
        if exists {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let username = input.username.clone();
        let role_id = input.role_id;
        let active_model: entity::ActiveModel = input.into();

        // A concurrent insert of the same username loses here and is
        // mapped to DuplicateUsername by the constraint backstop
        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| map_write_err(&username, role_id, e))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<UserSummary>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> UserResult<Vec<UserSummary>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        // Fetch existing user
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?
            .ok_or(UserError::NotFound(id))?;

        // Duplicate check excluding the row being updated
        if self
            .is_username_taken_by_other(&input.username, id)
            .await?
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let mut user: User = model.into();
        let username = input.username.clone();
        let role_id = input.role_id;
        user.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            phone: Set(user.phone.clone()),
            email: Set(user.email.clone()),
            city: Set(user.city.clone()),
            role_id: Set(user.role_id),
        };

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| map_write_err(&username, role_id, e))?;

        tracing::info!(user_id = id, "Updated user");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let exists = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .one(self.base.db())
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?
            .is_some();

        Ok(exists)
    }

    async fn is_username_taken_by_other(&self, username: &str, id: i32) -> UserResult<bool> {
        let exists = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .filter(entity::Column::Id.ne(id))
            .one(self.base.db())
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?
            .is_some();

        Ok(exists)
    }

    async fn find_in_high_risk_zones(&self) -> UserResult<Vec<HighRiskUser>> {
        let models = entity::Entity::find()
            .join(JoinType::InnerJoin, entity::Relation::RiskZone.def())
            .filter(entity::risk_zone::Column::RiskLevel.eq(RiskLevel::High))
            .order_by_asc(entity::Column::Username)
            .all(self.base.db())
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
