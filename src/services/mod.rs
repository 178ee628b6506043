pub mod password;
pub mod subject_service;
pub mod user_service;

pub use subject_service::{SubjectService, SubjectServiceError};
pub use user_service::{UserService, UserServiceError};
