//! Integration tests for Roles domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Database queries work correctly
//! - Constraints are enforced
//! - Concurrent operations are handled properly

use domain_roles::*;
use sea_orm::ConnectionTrait;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_role() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("role_create_and_get");

    let input = CreateRole {
        name: builder.name("role", "main"),
        description: "Integration test role".to_string(),
    };

    // Create role
    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.description, input.description);
    assert!(created.id > 0, "database should assign a positive id");

    // Insert-then-fetch equality
    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "role should exist");

    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_list_roles_id_order() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("role_list_order");

    for suffix in ["a", "b", "c"] {
        repo.create(CreateRole {
            name: builder.name("role", suffix),
            description: String::new(),
        })
        .await
        .unwrap();
    }

    let roles = repo.list().await.unwrap();

    // Seeded roles plus the three created above
    assert!(roles.len() >= 5);
    assert!(roles.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_update_role() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("role_update");

    let created = repo
        .create(CreateRole {
            name: builder.name("role", "original"),
            description: "Original description".to_string(),
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateRole {
                name: builder.name("role", "updated"),
                description: "Updated description".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, builder.name("role", "updated"));
    assert_eq!(updated.description, "Updated description");
}

#[tokio::test]
async fn test_update_missing_role_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());

    let result = repo
        .update(
            999_999,
            UpdateRole {
                name: "ghost".to_string(),
                description: String::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(RoleError::NotFound(999_999))));
}

#[tokio::test]
async fn test_delete_role() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("role_delete");

    let created = repo
        .create(CreateRole {
            name: builder.name("role", "to-delete"),
            description: String::new(),
        })
        .await
        .unwrap();

    // Delete should succeed
    let deleted = repo.delete(created.id).await.unwrap();
    assert!(deleted, "delete should return true");

    // Role should no longer exist
    let retrieved = repo.get_by_id(created.id).await.unwrap();
    assert!(retrieved.is_none(), "role should be deleted");

    // Second delete should return false
    let deleted_again = repo.delete(created.id).await.unwrap();
    assert!(!deleted_again, "second delete should return false");
}

#[tokio::test]
async fn test_delete_role_in_use_is_rejected() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("role_delete_in_use");

    let role = repo
        .create(CreateRole {
            name: builder.name("role", "assigned"),
            description: String::new(),
        })
        .await
        .unwrap();

    // Assign the role to a user directly
    db.connection
        .execute_unprepared(&format!(
            "INSERT INTO users (username, phone, email, city, role_id) \
             VALUES ('{}', '{}', '{}', 'Greenfield', {})",
            builder.username("holder"),
            builder.phone(),
            builder.email("holder"),
            role.id
        ))
        .await
        .unwrap();

    // RESTRICT foreign key blocks the delete
    let result = repo.delete(role.id).await;
    assert!(
        matches!(result, Err(RoleError::InUse(id)) if id == role.id),
        "Expected InUse error, got {:?}",
        result
    );

    // Role still exists
    let retrieved = repo.get_by_id(role.id).await.unwrap();
    assert!(retrieved.is_some(), "role should survive a blocked delete");
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_validation() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let service = RoleService::new(repo);

    // Empty name should fail
    let result = service
        .create_role(CreateRole {
            name: String::new(),
            description: String::new(),
        })
        .await;
    assert!(
        matches!(result, Err(RoleError::Validation(_))),
        "empty name should fail validation"
    );

    // Name too long should fail
    let result = service
        .create_role(CreateRole {
            name: "a".repeat(101),
            description: String::new(),
        })
        .await;
    assert!(
        matches!(result, Err(RoleError::Validation(_))),
        "name too long should fail validation"
    );
}

#[tokio::test]
async fn test_service_delete_missing_role() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let service = RoleService::new(repo);

    let result = service.delete_role(999_999).await;
    assert!(matches!(result, Err(RoleError::NotFound(_))));
}

// ============================================================================
// Concurrent Operations Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_creates() {
    let db = TestDatabase::new().await;
    let repo = PgRoleRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("role_concurrent");

    // Spawn multiple concurrent create operations
    let mut handles = vec![];
    for i in 0..5 {
        let repo_clone = PgRoleRepository::new(db.connection());
        let name = builder.name("role", &format!("concurrent-{}", i));

        let handle = tokio::spawn(async move {
            repo_clone
                .create(CreateRole {
                    name,
                    description: String::new(),
                })
                .await
        });

        handles.push(handle);
    }

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    // All should succeed with distinct ids
    let mut ids: Vec<i32> = results
        .into_iter()
        .map(|r| r.expect("concurrent create should succeed").id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5, "ids should be distinct");

    let all_roles = repo.list().await.unwrap();
    assert!(all_roles.len() >= 5);
}
