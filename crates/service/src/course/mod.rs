//! Courses: inverse side of enrollment, optionally taught by one instructor.
pub mod domain;
pub mod repository;
pub mod service;

pub use domain::CoursePayload;
pub use repository::{CourseRepository, SeaOrmCourseRepository};
pub use service::CourseService;
