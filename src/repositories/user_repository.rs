use super::error::{RepositoryError, RepositoryResult};
use crate::models::user::User;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<User>;
    async fn find_by_username(&self, username: &str) -> RepositoryResult<User>;
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> RepositoryResult<i64>;
    async fn update_user(&self, user: &User) -> RepositoryResult<()>;
    async fn delete_user(&self, id: i64) -> RepositoryResult<()>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM user
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM user
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM user
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> RepositoryResult<i64> {
        let result =
            sqlx::query("INSERT INTO user (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_user(&self, user: &User) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE user
            SET username = ?, email = ?, password_hash = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_user(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM user WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
