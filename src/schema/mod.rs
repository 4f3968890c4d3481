pub mod course;
pub mod auth;

pub use auth::{CredentialRecord, LoginResponse};
pub use course::{Course, CourseDraft, CoursesResponse, CreateCourseResponse};
