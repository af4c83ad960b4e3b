use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, HighRiskUser, RiskLevel, UpdateUser, User, UserSummary};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user. The store's unique constraint on username is the
    /// authoritative duplicate guard.
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user summary by ID
    async fn get_by_id(&self, id: i32) -> UserResult<Option<UserSummary>>;

    /// List all users as summaries, id order
    async fn list(&self) -> UserResult<Vec<UserSummary>>;

    /// Update an existing user (full overwrite of mutable fields)
    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: i32) -> UserResult<bool>;

    /// Check whether any user holds the given username
    async fn exists_by_username(&self, username: &str) -> UserResult<bool>;

    /// Check whether a user other than `id` holds the given username
    /// (self-match is not a duplicate)
    async fn is_username_taken_by_other(&self, username: &str, id: i32) -> UserResult<bool>;

    /// All users whose city is classified high-risk, username order
    async fn find_in_high_risk_zones(&self) -> UserResult<Vec<HighRiskUser>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i32, User>>>,
    risk_zones: Arc<RwLock<HashMap<String, RiskLevel>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            risk_zones: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    /// Classify a city for the high-risk report (mirrors the seeded
    /// risk_zones table).
    pub async fn classify_city(&self, city: &str, risk_level: RiskLevel) {
        let mut zones = self.risk_zones.write().await;
        zones.insert(city.to_string(), risk_level);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Duplicate check under the write lock mirrors the database
        // unique index closing the check-then-insert race
        if users.values().any(|u| u.username == input.username) {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(id, input);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<UserSummary>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned().map(UserSummary::from))
    }

    async fn list(&self) -> UserResult<Vec<UserSummary>> {
        let users = self.users.read().await;

        let mut result: Vec<UserSummary> =
            users.values().cloned().map(UserSummary::from).collect();
        result.sort_by_key(|u| u.id);

        Ok(result)
    }

    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }

        let taken = users
            .values()
            .any(|u| u.id != id && u.username == input.username);
        if taken {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let user = users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply_update(input);
        let updated = user.clone();

        tracing::info!(user_id = id, "Updated user");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }

    async fn is_username_taken_by_other(&self, username: &str, id: i32) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.id != id && u.username == username))
    }

    async fn find_in_high_risk_zones(&self) -> UserResult<Vec<HighRiskUser>> {
        let users = self.users.read().await;
        let zones = self.risk_zones.read().await;

        let mut result: Vec<HighRiskUser> = users
            .values()
            .filter(|u| zones.get(&u.city) == Some(&RiskLevel::High))
            .cloned()
            .map(HighRiskUser::from)
            .collect();
        result.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(username: &str, city: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            phone: "+1-555-0100".to_string(),
            email: format!("{}@example.com", username),
            city: city.to_string(),
            role_id: 1,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(create_input("casey", "Riverton")).await.unwrap();
        assert_eq!(user.username, "casey");

        let fetched = repo.get_by_id(user.id).await.unwrap();
        assert_eq!(fetched, Some(UserSummary::from(user)));
    }

    #[tokio::test]
    async fn test_duplicate_username_error() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_input("taken", "Riverton")).await.unwrap();

        let result = repo.create(create_input("taken", "Lakeside")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));

        // Exactly one row stored
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_self_match_is_not_a_duplicate() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(create_input("stable", "Riverton")).await.unwrap();

        // Keeping the same username on update must succeed
        let updated = repo
            .update(
                user.id,
                UpdateUser {
                    username: "stable".to_string(),
                    phone: "+1-555-0101".to_string(),
                    email: "stable@example.com".to_string(),
                    city: "Lakeside".to_string(),
                    role_id: 1,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "stable");
        assert_eq!(updated.city, "Lakeside");
    }

    #[tokio::test]
    async fn test_update_to_taken_username_rejected() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_input("first", "Riverton")).await.unwrap();
        let second = repo.create(create_input("second", "Riverton")).await.unwrap();

        let result = repo
            .update(
                second.id,
                UpdateUser {
                    username: "first".to_string(),
                    phone: String::new(),
                    email: "second@example.com".to_string(),
                    city: "Riverton".to_string(),
                    role_id: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_high_risk_report_filters_by_zone() {
        let repo = InMemoryUserRepository::new();
        repo.classify_city("Riverton", RiskLevel::High).await;
        repo.classify_city("Greenfield", RiskLevel::Low).await;

        repo.create(create_input("exposed", "Riverton")).await.unwrap();
        repo.create(create_input("safe", "Greenfield")).await.unwrap();
        repo.create(create_input("unclassified", "Nowhere")).await.unwrap();

        let report = repo.find_in_high_risk_zones().await.unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].username, "exposed");
        assert_eq!(report[0].city, "Riverton");
    }
}
