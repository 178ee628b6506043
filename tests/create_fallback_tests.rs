//! The routed create endpoint still answers 201 when the inserted row cannot
//! be read back.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use timetracker::{
    models::User,
    repositories::{RepositoryError, RepositoryResult, SqliteSubjectRepository, UserRepository},
    routes::create_app,
    services::{SubjectService, UserService},
    test_utils::test_helpers,
    AppState,
};
use tower::ServiceExt;

/// Accepts inserts but fails every read.
struct WriteOnlyUserRepository;

#[async_trait]
impl UserRepository for WriteOnlyUserRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i64) -> RepositoryResult<User> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_username(&self, _username: &str) -> RepositoryResult<User> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_user(
        &self,
        _username: &str,
        _email: &str,
        _password_hash: &str,
    ) -> RepositoryResult<i64> {
        Ok(42)
    }

    async fn update_user(&self, _user: &User) -> RepositoryResult<()> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_user(&self, _id: i64) -> RepositoryResult<()> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_create_acknowledges_when_refetch_fails() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let users: Arc<dyn UserRepository> = Arc::new(WriteOnlyUserRepository);
    let state = AppState {
        user_service: Arc::new(UserService::new(users.clone())),
        subject_service: Arc::new(SubjectService::new(
            Arc::new(SqliteSubjectRepository::new(pool)),
            users,
        )),
    };
    let app = create_app(state);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": " ana ", "email": "ana@example.com", "password": "pw"})
                .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({"id": 42, "username": "ana", "email": "ana@example.com", "created": true})
    );
}
