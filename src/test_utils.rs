pub mod test_helpers {
    use crate::services::password::hash_password;
    use sqlx::{
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
        SqlitePool,
    };
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(":memory:")?.foreign_keys(true);

        // A single connection that never expires keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = crate::db::create_pool(&database_url).await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a test user with a hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = hash_password(password);

        let result =
            sqlx::query("INSERT INTO user (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a subject owned by `user_id`
    pub async fn insert_test_subject(
        pool: &SqlitePool,
        user_id: i64,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO subject (name, user_id) VALUES (?, ?)")
            .bind(name)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}

// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}

#[cfg(test)]
pub use test_helpers::insert_test_user as create_test_user;
