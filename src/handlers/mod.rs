pub mod subject_handlers;
pub mod user_handlers;
pub mod welcome_handlers;

pub use subject_handlers::{
    create_subject, delete_subject, delete_subject_by_name, get_subject, list_subjects,
    list_user_subjects, update_subject,
};
pub use user_handlers::{
    create_user, delete_user, get_user, list_users, register_user, update_user,
};
pub use welcome_handlers::{index_handler, welcome_handler};
