pub mod error;
pub mod subject_repository;
pub mod user_repository;

pub use error::{RepositoryError, RepositoryResult};
pub use subject_repository::{SqliteSubjectRepository, SubjectRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
