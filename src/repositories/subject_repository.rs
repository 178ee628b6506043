use super::error::{RepositoryError, RepositoryResult};
use crate::models::subject::Subject;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SubjectRepository: Send + Sync {
    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Subject>;
    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Subject>>;
    async fn create_subject(&self, name: &str, user_id: i64) -> RepositoryResult<i64>;
    /// Renames a subject; both the id and the owner must match.
    async fn update_subject(&self, subject: &Subject) -> RepositoryResult<()>;
    async fn delete_subject(&self, id: i64) -> RepositoryResult<()>;
    async fn delete_by_user_and_name(&self, user_id: i64, name: &str) -> RepositoryResult<()>;
}

pub struct SqliteSubjectRepository {
    pool: SqlitePool,
}

impl SqliteSubjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for SqliteSubjectRepository {
    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>> {
        let subjects =
            sqlx::query_as::<_, Subject>("SELECT id, name, user_id FROM subject ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(subjects)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Subject> {
        sqlx::query_as::<_, Subject>("SELECT id, name, user_id FROM subject WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"
            SELECT id, name, user_id
            FROM subject
            WHERE user_id = ?
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    async fn create_subject(&self, name: &str, user_id: i64) -> RepositoryResult<i64> {
        let result = sqlx::query("INSERT INTO subject (name, user_id) VALUES (?, ?)")
            .bind(name)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_subject(&self, subject: &Subject) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE subject SET name = ? WHERE id = ? AND user_id = ?")
            .bind(&subject.name)
            .bind(subject.id)
            .bind(subject.user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_subject(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM subject WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_by_user_and_name(&self, user_id: i64, name: &str) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM subject WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
