//! Session cookie behavior over the HTTP surface.
//!
//! Drives requests through the full router so the identity middleware,
//! the cookie attributes and the auth handlers are exercised together,
//! with a domain-scoped (non-local) configuration.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use puzzlebase::api::{create_router, AppState};
use puzzlebase::config::Config;
use puzzlebase::domain::{Password, User};
use puzzlebase::infra::repositories::{
    CollectionRepository, LevelRepository, MockCollectionRepository, MockLevelRepository,
    MockReviewRepository, MockUserRepository, ReviewRepository, UserRepository,
};
use puzzlebase::infra::{Database, UnitOfWork};
use puzzlebase::services::{
    Authenticator, CollectionManager, LevelManager, ReviewManager, UserManager,
};

struct TestUow {
    users: Arc<dyn UserRepository>,
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn levels(&self) -> Arc<dyn LevelRepository> {
        Arc::new(MockLevelRepository::new())
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        Arc::new(MockReviewRepository::new())
    }

    fn collections(&self) -> Arc<dyn CollectionRepository> {
        Arc::new(MockCollectionRepository::new())
    }
}

/// Full application state over mocked persistence, as deployed behind
/// a real domain: non-local, cookie scoped to `puzzlebase.example`.
fn test_state(users: MockUserRepository) -> AppState {
    let config = Config::test_default()
        .with_secret("session-test-secret")
        .with_cookie_domain("puzzlebase.example");
    let uow = Arc::new(TestUow {
        users: Arc::new(users),
    });

    AppState {
        auth_service: Arc::new(Authenticator::new(uow.clone(), config.clone())),
        user_service: Arc::new(UserManager::new(uow.clone())),
        level_service: Arc::new(LevelManager::new(uow.clone())),
        review_service: Arc::new(ReviewManager::new(uow.clone())),
        collection_service: Arc::new(CollectionManager::new(uow)),
        database: Arc::new(Database::disconnected()),
        config,
    }
}

async fn body_json(body: Body) -> Value {
    serde_json::from_slice(&to_bytes(body, usize::MAX).await.unwrap()).unwrap()
}

#[tokio::test]
async fn login_cookie_is_scoped_to_the_configured_domain() {
    let hash = Password::new("correct-horse").unwrap().into_string();
    let user = User::new(
        Uuid::new_v4(),
        "sol".to_string(),
        "sol@example.com".to_string(),
        hash,
    );

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(user.clone())));

    let app = create_router(test_state(users));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email": "sol@example.com", "password": "correct-horse"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Domain=puzzlebase.example"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn logout_clears_the_cookie_with_matching_scope() {
    let app = create_router(test_state(MockUserRepository::new()));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "token=whatever")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // A browser only drops the cookie when the expiring Set-Cookie
    // repeats the Domain and Path it was stored under
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Domain=puzzlebase.example"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body = body_json(response.into_body()).await;
    assert_eq!(body, serde_json::json!({"success": true}));
}

#[tokio::test]
async fn stale_cookie_does_not_block_public_reads() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_name().returning(|_| Ok(None));

    let app = create_router(test_state(users));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/somebody/profile")
                .header(header::COOKIE, "token=not-a-valid-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The garbled session is ignored, not a 401
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn stale_cookie_is_rejected_on_gated_routes() {
    let app = create_router(test_state(MockUserRepository::new()));
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/levels/{}", Uuid::new_v4()))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, "token=not-a-valid-jwt")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body, serde_json::json!({"error": "Authentication required"}));
}
