pub mod course;
pub mod timestamp;

pub use course::{Course, CourseDraft, NewCourseRequest, UpdateCourseRequest};
pub use timestamp::Timestamp;
