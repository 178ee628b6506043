use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `subject` table, owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubjectRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubjectRequest {
    #[serde(default)]
    pub name: String,
}

/// Query string of `DELETE /users/{user_id}/subjects?name=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSubjectQuery {
    pub name: String,
}
