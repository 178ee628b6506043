pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use repositories::{SqliteSubjectRepository, SqliteUserRepository};
use services::{SubjectService, UserService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub subject_service: Arc<SubjectService>,
}

impl AppState {
    /// Wires the SQLite repositories and services around an existing pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let subject_repository = Arc::new(SqliteSubjectRepository::new(pool));

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let subject_service = Arc::new(SubjectService::new(subject_repository, user_repository));

        Self {
            user_service,
            subject_service,
        }
    }
}
