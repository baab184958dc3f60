use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::errors::ErrorDetail;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct InstructorRefDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
pub struct CourseRefDoc {
    pub id: i32,
    pub name: String,
    /// Omitted when the course has no instructor.
    pub instructor: Option<InstructorRefDoc>,
}

#[derive(ToSchema)]
pub struct StudentRefDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
pub struct StudentDoc { pub id: i32, pub name: String, pub courses: Vec<CourseRefDoc> }

#[derive(ToSchema)]
pub struct CourseDoc {
    pub id: i32,
    pub name: String,
    pub instructor: Option<InstructorRefDoc>,
    pub students: Vec<StudentRefDoc>,
}

#[derive(ToSchema)]
pub struct InstructorDoc { pub id: i32, pub name: String, pub courses: Vec<CourseRefDoc> }

#[derive(ToSchema)]
pub struct CourseStudentCountDoc { pub id: i32, pub name: String, pub student_count: i64 }

/// Body for student create/update. `studid` and `studname` are accepted as aliases.
#[derive(ToSchema)]
pub struct StudentPayloadDoc {
    /// Must be absent on create; must match the path id on update.
    pub id: Option<i32>,
    #[schema(example = "Erin")]
    pub name: Option<String>,
    /// Replaces the full enrollment set when present.
    pub course_ids: Option<Vec<i32>>,
}

#[derive(ToSchema)]
pub struct CoursePayloadDoc {
    pub id: Option<i32>,
    #[schema(example = "Data Science")]
    pub name: Option<String>,
    /// `null` clears the instructor on update; absent keeps it.
    pub instructor_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct InstructorPayloadDoc {
    pub id: Option<i32>,
    #[schema(example = "Sally")]
    pub name: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list_all_students,
        crate::routes::students::get_student_by_id,
        crate::routes::students::get_student_by_name_containing,
        crate::routes::students::add_new_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student_by_id,
        crate::routes::students::enroll_student,
        crate::routes::students::unenroll_student,
        crate::routes::courses::list_all_courses,
        crate::routes::courses::student_counts,
        crate::routes::courses::get_course_by_id,
        crate::routes::courses::add_new_course,
        crate::routes::courses::update_course,
        crate::routes::courses::delete_course,
        crate::routes::instructors::list_all_instructors,
        crate::routes::instructors::get_instructor_by_id,
        crate::routes::instructors::add_new_instructor,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDetail,
            InstructorRefDoc,
            CourseRefDoc,
            StudentRefDoc,
            StudentDoc,
            CourseDoc,
            InstructorDoc,
            CourseStudentCountDoc,
            StudentPayloadDoc,
            CoursePayloadDoc,
            InstructorPayloadDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students", description = "Student management, owning side of enrollment"),
        (name = "courses"),
        (name = "instructors")
    )
)]
pub struct ApiDoc;
