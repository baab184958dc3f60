use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::course::{CourseService, SeaOrmCourseRepository};
use service::instructor::{InstructorService, SeaOrmInstructorRepository};
use service::pagination::PageLimits;
use service::student::{NameMatch, SeaOrmStudentRepository, StudentService};

pub type Students = StudentService<SeaOrmStudentRepository>;
pub type Courses = CourseService<SeaOrmCourseRepository, SeaOrmInstructorRepository>;
pub type Instructors = InstructorService<SeaOrmInstructorRepository>;

/// Shared handler state. Services are built once here and cloned per request by `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<Students>,
    pub courses: Arc<Courses>,
    pub instructors: Arc<Instructors>,
    pub paging: PageLimits,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, paging: PageLimits, name_match: NameMatch) -> Self {
        let student_repo = Arc::new(SeaOrmStudentRepository::new(db.clone()));
        let course_repo = Arc::new(SeaOrmCourseRepository::new(db.clone()));
        let instructor_repo = Arc::new(SeaOrmInstructorRepository::new(db));

        Self {
            students: Arc::new(StudentService::new(student_repo).with_name_match(name_match)),
            courses: Arc::new(CourseService::new(course_repo, Arc::clone(&instructor_repo))),
            instructors: Arc::new(InstructorService::new(instructor_repo)),
            paging,
        }
    }
}
