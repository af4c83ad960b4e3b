use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, HighRiskUser, ReportAccess, UpdateUser, User, UserSummary};
use crate::repository::UserRepository;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

// Manual Clone so R itself does not need to be Clone
impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with validation and duplicate-username rejection.
    ///
    /// The pre-check gives a friendly early rejection; the repository's
    /// unique constraint remains the authoritative guard under concurrency.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.exists_by_username(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }

        self.repository.create(input).await
    }

    /// Get a user summary by ID
    pub async fn get_user(&self, id: i32) -> UserResult<UserSummary> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// List all users as summaries
    pub async fn list_users(&self) -> UserResult<Vec<UserSummary>> {
        self.repository.list().await
    }

    /// Update a user (full overwrite of mutable fields). Keeping one's own
    /// username is not a duplicate.
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self
            .repository
            .is_username_taken_by_other(&input.username, id)
            .await?
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        self.repository.update(id, input).await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// All users living in high-risk cities, username order.
    ///
    /// Takes a [`ReportAccess`] token by value; authorization happened
    /// where the token was minted.
    pub async fn high_risk_report(&self, _access: ReportAccess) -> UserResult<Vec<HighRiskUser>> {
        self.repository.find_in_high_risk_zones().await
    }
}
