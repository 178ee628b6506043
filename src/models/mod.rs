pub mod subject;
pub mod user;

pub use subject::{CreateSubjectRequest, DeleteSubjectQuery, Subject, UpdateSubjectRequest};
pub use user::{CreateUserRequest, CreateUserResponse, MessageResponse, UpdateUserRequest, User};
