use crate::repositories::RepositoryError;
use crate::services::{SubjectServiceError, UserServiceError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::MissingFields => AppError::Validation(err.to_string()),
            UserServiceError::UserNotFound => AppError::NotFound(err.to_string()),
            UserServiceError::UsernameOrEmailTaken => AppError::Conflict(err.to_string()),
            UserServiceError::RepositoryError(e) => AppError::Database(e),
        }
    }
}

impl From<SubjectServiceError> for AppError {
    fn from(err: SubjectServiceError) -> Self {
        match err {
            SubjectServiceError::MissingName => AppError::Validation(err.to_string()),
            SubjectServiceError::UserNotFound | SubjectServiceError::SubjectNotFound => {
                AppError::NotFound(err.to_string())
            }
            SubjectServiceError::SubjectExists => AppError::Conflict(err.to_string()),
            SubjectServiceError::RepositoryError(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(ref e) => {
                tracing::error!("Storage failure: {}", e);
                "Internal server error".to_string()
            }
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::Validation(msg) => msg,
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let response = AppError::from(UserServiceError::MissingFields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Username, email and password are required"
        );
    }

    #[tokio::test]
    async fn test_conflict_is_409() {
        let response = AppError::from(UserServiceError::UsernameOrEmailTaken).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_missing_subject_is_404() {
        let response = AppError::from(SubjectServiceError::SubjectNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }
}
