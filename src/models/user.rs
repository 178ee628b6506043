use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `user` table.
///
/// The password hash and creation timestamp never leave the server: the
/// outbound JSON shape is `{id, username, email}`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(skip_serializing, default)]
    pub created_at: String,
}

/// Body of `POST /users` and `POST /api/users`.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// JSON extractor, decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /users/{id}`. Empty fields keep the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Minimal acknowledgment returned when a user was inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_hides_secrets() {
        let user = User {
            id: 7,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "00ff:abcd".to_string(),
            created_at: "2025-01-01 00:00:00".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "username": "ana", "email": "ana@example.com"})
        );
    }

    #[test]
    fn test_create_request_missing_fields_default_to_empty() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"username": "ana"}"#).unwrap();
        assert_eq!(request.username, "ana");
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_create_response_omits_empty_message() {
        let response = CreateUserResponse {
            id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            created: true,
            message: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("message").is_none());
    }
}
