//! Handler tests for Users domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! Unlike E2E tests, these test ONLY the users domain handlers,
//! not the full application with routing, auth middleware, etc. The
//! report handler reads claims from request extensions, so tests
//! inject them directly instead of minting tokens.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::JwtClaims;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn claims_with_roles(roles: &[&str]) -> JwtClaims {
    JwtClaims {
        sub: "1".to_string(),
        email: "caller@example.com".to_string(),
        name: "Caller".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: 0,
        iat: 0,
        jti: String::new(),
    }
}

fn create_input(builder: &TestDataBuilder, suffix: &str, city: &str, role_id: i32) -> CreateUser {
    CreateUser {
        username: builder.username(suffix),
        phone: builder.phone(),
        email: builder.email(suffix),
        city: city.to_string(),
        role_id,
    }
}

#[tokio::test]
async fn test_create_user_handler_returns_201() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("user_handler_create_201");

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.username("create"),
                "phone": builder.phone(),
                "email": builder.email("create"),
                "city": "Riverton",
                "role_id": role_id
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let user: User = json_body(response.into_body()).await;
    assert_eq!(user.username, builder.username("create"));
    assert_eq!(user.city, "Riverton");
}

#[tokio::test]
async fn test_create_user_handler_validates_email() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("user_handler_bad_email");

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.username("bad-email"),
                "email": "not-an-email",
                "city": "Riverton",
                "role_id": role_id
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_handler_duplicate_returns_409() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("user_handler_duplicate");

    service
        .create_user(create_input(&builder, "dup", "Riverton", role_id))
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.username("dup"),
                "email": builder.email("second"),
                "city": "Lakeside",
                "role_id": role_id
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_user_handler_returns_summary_without_phone() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("user_handler_get_200");

    let created = service
        .create_user(create_input(&builder, "get", "Riverton", role_id))
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["username"], builder.username("get"));
    assert!(body.get("phone").is_none(), "summary must not expose phone");
}

#[tokio::test]
async fn test_get_user_handler_returns_404_for_missing() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/999999")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_handler_returns_200() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("user_handler_list");

    service
        .create_user(create_input(&builder, "list-a", "Riverton", role_id))
        .await
        .unwrap();
    service
        .create_user(create_input(&builder, "list-b", "Lakeside", role_id))
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<UserSummary> = json_body(response.into_body()).await;
    assert!(users.len() >= 2);
}

#[tokio::test]
async fn test_update_user_handler_returns_200() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("user_handler_update");

    let created = service
        .create_user(create_input(&builder, "update", "Riverton", role_id))
        .await
        .unwrap();

    let app = handlers::router(service);

    // Same username (self-match), new city
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.username("update"),
                "phone": builder.phone(),
                "email": builder.email("update"),
                "city": "Lakeside",
                "role_id": role_id
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let user: User = json_body(response.into_body()).await;
    assert_eq!(user.id, created.id);
    assert_eq!(user.city, "Lakeside");
}

#[tokio::test]
async fn test_delete_user_handler_returns_204() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("user_handler_delete");

    let created = service
        .create_user(create_input(&builder, "delete", "Riverton", role_id))
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_high_risk_report_handler_requires_admin() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let app = handlers::report_router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/reports/high-risk")
        .extension(claims_with_roles(&["user"]))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_high_risk_report_handler_returns_200_for_admin() {
    let db = TestDatabase::new().await;
    let role_id = db.seeded_role_id("user").await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("user_handler_report");

    // Riverton is seeded high-risk, Greenfield low
    service
        .create_user(create_input(&builder, "exposed", "Riverton", role_id))
        .await
        .unwrap();
    service
        .create_user(create_input(&builder, "safe", "Greenfield", role_id))
        .await
        .unwrap();

    let app = handlers::report_router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/reports/high-risk")
        .extension(claims_with_roles(&["admin"]))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let report: Vec<HighRiskUser> = json_body(response.into_body()).await;
    assert!(report.iter().any(|r| r.username == builder.username("exposed")));
    assert!(!report.iter().any(|r| r.username == builder.username("safe")));
}
