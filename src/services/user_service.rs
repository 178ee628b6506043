use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::repositories::user_repository::UserRepository;
use crate::repositories::RepositoryError;
use crate::services::password::{hash_password, verify_password};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Username, email and password are required")]
    MissingFields,
    #[error("User not found")]
    UserNotFound,
    #[error("Username or email already exists")]
    UsernameOrEmailTaken,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users().await?)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, UserServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(not_found_as_missing_user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, UserServiceError> {
        self.repository
            .find_by_username(username)
            .await
            .map_err(not_found_as_missing_user)
    }

    /// Validates the request, hashes the password and inserts the row.
    /// Returns the new user's id.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<i64, UserServiceError> {
        let username = request.username.trim();
        let email = request.email.trim();

        if username.is_empty() || email.is_empty() || request.password.is_empty() {
            return Err(UserServiceError::MissingFields);
        }

        let password_hash = hash_password(&request.password);

        match self
            .repository
            .create_user(username, email, &password_hash)
            .await
        {
            Ok(id) => {
                tracing::info!(user_id = id, username, "User created");
                Ok(id)
            }
            Err(RepositoryError::Conflict(detail)) => {
                tracing::warn!(username, %detail, "Rejected duplicate user");
                Err(UserServiceError::UsernameOrEmailTaken)
            }
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    /// Merges non-empty request fields over the stored row and persists it.
    pub async fn update_user(
        &self,
        id: i64,
        request: UpdateUserRequest,
    ) -> Result<User, UserServiceError> {
        let mut user = self.get_user(id).await?;

        let username = request.username.trim();
        if !username.is_empty() {
            user.username = username.to_string();
        }
        let email = request.email.trim();
        if !email.is_empty() {
            user.email = email.to_string();
        }
        if !request.password.is_empty() {
            user.password_hash = hash_password(&request.password);
        }

        match self.repository.update_user(&user).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(UserServiceError::UserNotFound),
            Err(RepositoryError::Conflict(detail)) => {
                tracing::warn!(user_id = id, %detail, "Rejected conflicting user update");
                return Err(UserServiceError::UsernameOrEmailTaken);
            }
            Err(e) => return Err(UserServiceError::RepositoryError(e)),
        }

        self.get_user(id).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
        match self.repository.delete_user(id).await {
            Ok(()) => {
                tracing::info!(user_id = id, "User deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    /// Looks the user up by username and checks the password against the
    /// stored salted hash.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, UserServiceError> {
        let user = self.get_user_by_username(username).await?;
        Ok(verify_password(password, &user.password_hash))
    }
}

fn not_found_as_missing_user(err: RepositoryError) -> UserServiceError {
    match err {
        RepositoryError::NotFound => UserServiceError::UserNotFound,
        e => UserServiceError::RepositoryError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;

    fn stored_user() -> User {
        User {
            id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: hash_password("password123"),
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create_user()
            .with(
                eq("ana"),
                eq("ana@example.com"),
                function(|hash: &str| verify_password("password123", hash)),
            )
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(1) }));

        let service = UserService::new(Arc::new(mock_repo));

        let request = CreateUserRequest {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "password123".to_string(),
        };

        let id = service.create_user(request).await.expect("Expected Ok result");
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_create_user_missing_fields() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create_user().never();
        let service = UserService::new(Arc::new(mock_repo));

        for (username, email, password) in [
            ("", "ana@example.com", "password123"),
            ("ana", "", "password123"),
            ("ana", "ana@example.com", ""),
            ("   ", "ana@example.com", "password123"),
        ] {
            let request = CreateUserRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            };
            let result = service.create_user(request).await;
            assert!(matches!(result, Err(UserServiceError::MissingFields)));
        }
    }

    #[tokio::test]
    async fn test_create_user_conflict() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create_user().times(1).returning(|_, _, _| {
            Box::pin(async {
                Err(RepositoryError::Conflict(
                    "UNIQUE constraint failed: user.username".to_string(),
                ))
            })
        });

        let service = UserService::new(Arc::new(mock_repo));
        let request = CreateUserRequest {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "password123".to_string(),
        };

        let result = service.create_user(request).await;
        assert!(matches!(result, Err(UserServiceError::UsernameOrEmailTaken)));
    }

    #[tokio::test]
    async fn test_update_user_keeps_unset_fields() {
        let mut mock_repo = MockUserRepository::new();
        let original = stored_user();
        let original_hash = original.password_hash.clone();

        let first = original.clone();
        let mut updated = original.clone();
        updated.email = "new@example.com".to_string();
        let mut fetches = vec![updated, first];

        mock_repo
            .expect_find_by_id()
            .with(eq(1))
            .times(2)
            .returning(move |_| {
                let user = fetches.pop().expect("fetch queue");
                Box::pin(async move { Ok(user) })
            });

        let expected_hash = original_hash.clone();
        mock_repo
            .expect_update_user()
            .withf(move |user: &User| {
                user.username == "ana"
                    && user.email == "new@example.com"
                    && user.password_hash == expected_hash
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let service = UserService::new(Arc::new(mock_repo));
        let request = UpdateUserRequest {
            email: "new@example.com".to_string(),
            ..Default::default()
        };

        let user = service.update_user(1, request).await.unwrap();
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.username, "ana");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Err(RepositoryError::NotFound) }));
        mock_repo.expect_update_user().never();

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.update_user(9, UpdateUserRequest::default()).await;
        assert!(matches!(result, Err(UserServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_username()
            .with(eq("ana"))
            .returning(|_| Box::pin(async { Ok(stored_user()) }));

        let service = UserService::new(Arc::new(mock_repo));
        assert!(service.verify_credentials("ana", "password123").await.unwrap());
        assert!(!service.verify_credentials("ana", "wrong").await.unwrap());
    }
}
