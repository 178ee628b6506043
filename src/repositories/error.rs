use sqlx::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Uniqueness constraint violated: {0}")]
    Conflict(String),
    #[error("Referenced record does not exist: {0}")]
    InvalidReference(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

/// Constraint failures are told apart by the driver's error kind, not its
/// message text.
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return RepositoryError::NotFound;
        }

        let constraint = err
            .as_database_error()
            .map(|db_err| (db_err.kind(), db_err.message().to_string()));

        match constraint {
            Some((ErrorKind::UniqueViolation, message)) => RepositoryError::Conflict(message),
            Some((ErrorKind::ForeignKeyViolation, message)) => {
                RepositoryError::InvalidReference(message)
            }
            _ => RepositoryError::Database(err),
        }
    }
}
