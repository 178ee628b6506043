use crate::models::subject::Subject;
use crate::repositories::{RepositoryError, SubjectRepository, UserRepository};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SubjectServiceError {
    #[error("Subject name is required")]
    MissingName,
    #[error("User not found")]
    UserNotFound,
    #[error("Subject not found")]
    SubjectNotFound,
    #[error("Subject already exists for this user")]
    SubjectExists,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct SubjectService {
    subjects: Arc<dyn SubjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl SubjectService {
    pub fn new(subjects: Arc<dyn SubjectRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { subjects, users }
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>, SubjectServiceError> {
        Ok(self.subjects.list_subjects().await?)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Subject>, SubjectServiceError> {
        self.ensure_user_exists(user_id).await?;
        Ok(self.subjects.list_by_user(user_id).await?)
    }

    /// Fetches a subject, treating one owned by somebody else as missing.
    pub async fn get_subject_for_user(
        &self,
        user_id: i64,
        subject_id: i64,
    ) -> Result<Subject, SubjectServiceError> {
        let subject = match self.subjects.find_by_id(subject_id).await {
            Ok(subject) => subject,
            Err(RepositoryError::NotFound) => return Err(SubjectServiceError::SubjectNotFound),
            Err(e) => return Err(e.into()),
        };

        if subject.user_id != user_id {
            return Err(SubjectServiceError::SubjectNotFound);
        }

        Ok(subject)
    }

    pub async fn create_subject(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<Subject, SubjectServiceError> {
        let name = validate_name(name)?;

        let id = match self.subjects.create_subject(name, user_id).await {
            Ok(id) => id,
            Err(RepositoryError::InvalidReference(_)) => {
                return Err(SubjectServiceError::UserNotFound)
            }
            Err(RepositoryError::Conflict(_)) => return Err(SubjectServiceError::SubjectExists),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(subject_id = id, user_id, name, "Subject created");

        Ok(Subject {
            id,
            name: name.to_string(),
            user_id,
        })
    }

    pub async fn rename_subject(
        &self,
        user_id: i64,
        subject_id: i64,
        name: &str,
    ) -> Result<Subject, SubjectServiceError> {
        let name = validate_name(name)?;
        let subject = Subject {
            id: subject_id,
            name: name.to_string(),
            user_id,
        };

        match self.subjects.update_subject(&subject).await {
            Ok(()) => Ok(subject),
            Err(RepositoryError::NotFound) => Err(SubjectServiceError::SubjectNotFound),
            Err(RepositoryError::Conflict(_)) => Err(SubjectServiceError::SubjectExists),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_subject(
        &self,
        user_id: i64,
        subject_id: i64,
    ) -> Result<(), SubjectServiceError> {
        self.get_subject_for_user(user_id, subject_id).await?;

        match self.subjects.delete_subject(subject_id).await {
            Ok(()) => {
                tracing::info!(subject_id, user_id, "Subject deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(SubjectServiceError::SubjectNotFound),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_subject_by_name(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<(), SubjectServiceError> {
        match self.subjects.delete_by_user_and_name(user_id, name).await {
            Ok(()) => {
                tracing::info!(user_id, name, "Subject deleted by name");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(SubjectServiceError::SubjectNotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn ensure_user_exists(&self, user_id: i64) -> Result<(), SubjectServiceError> {
        match self.users.find_by_id(user_id).await {
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound) => Err(SubjectServiceError::UserNotFound),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_name(name: &str) -> Result<&str, SubjectServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SubjectServiceError::MissingName);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::subject_repository::MockSubjectRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;

    fn service(subjects: MockSubjectRepository, users: MockUserRepository) -> SubjectService {
        SubjectService::new(Arc::new(subjects), Arc::new(users))
    }

    #[tokio::test]
    async fn test_create_subject_trims_name() {
        let mut subjects = MockSubjectRepository::new();
        subjects
            .expect_create_subject()
            .with(eq("Math"), eq(3))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(10) }));

        let created = service(subjects, MockUserRepository::new())
            .create_subject(3, "  Math ")
            .await
            .unwrap();

        assert_eq!(
            created,
            Subject {
                id: 10,
                name: "Math".to_string(),
                user_id: 3
            }
        );
    }

    #[tokio::test]
    async fn test_create_subject_rejects_empty_name() {
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_create_subject().never();

        let result = service(subjects, MockUserRepository::new())
            .create_subject(3, "   ")
            .await;
        assert!(matches!(result, Err(SubjectServiceError::MissingName)));
    }

    #[tokio::test]
    async fn test_create_subject_for_unknown_user() {
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_create_subject().returning(|_, _| {
            Box::pin(async {
                Err(RepositoryError::InvalidReference(
                    "FOREIGN KEY constraint failed".to_string(),
                ))
            })
        });

        let result = service(subjects, MockUserRepository::new())
            .create_subject(99, "Math")
            .await;
        assert!(matches!(result, Err(SubjectServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_subject_of_other_user_is_hidden() {
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_find_by_id().with(eq(5)).returning(|_| {
            Box::pin(async {
                Ok(Subject {
                    id: 5,
                    name: "Math".to_string(),
                    user_id: 1,
                })
            })
        });
        subjects.expect_delete_subject().never();

        let service = service(subjects, MockUserRepository::new());
        let result = service.delete_subject(2, 5).await;
        assert!(matches!(result, Err(SubjectServiceError::SubjectNotFound)));
    }

    #[tokio::test]
    async fn test_list_for_missing_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Err(RepositoryError::NotFound) }));
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_list_by_user().never();

        let result = service(subjects, users).list_for_user(4).await;
        assert!(matches!(result, Err(SubjectServiceError::UserNotFound)));
    }
}
