use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use tracing::info;

use service::pagination::PageRequest;
use service::student::StudentPayload;
use service::views::StudentView;

use crate::errors::JsonApiError;
use crate::state::ServerState;

type Created = (StatusCode, [(header::HeaderName, String); 1]);

#[utoipa::path(
    get, path = "/students/students", tag = "students",
    params(
        ("page" = Option<u64>, Query, description = "Results page you want to retrieve (0..N)"),
        ("size" = Option<u64>, Query, description = "Number of records per page, default 3"),
        ("sort" = Option<Vec<String>>, Query, description = "property(,asc|desc); repeatable, default ascending by id")
    ),
    responses(
        (status = 200, description = "List of students found", body = [crate::openapi::StudentDoc]),
        (status = 400, description = "Invalid paging parameters", body = crate::errors::ErrorDetail),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn list_all_students(
    State(state): State<ServerState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<StudentView>>, JsonApiError> {
    let Query(pairs) = query?;
    let page = PageRequest::from_query_pairs(&pairs, state.paging)?;
    let students = state.students.find_all(&page).await?;
    info!(count = students.len(), page = page.page, size = page.size, "list students");
    Ok(Json(students))
}

#[utoipa::path(
    get, path = "/students/Student/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student with given id found", body = crate::openapi::StudentDoc),
        (status = 404, description = "Student with specified id not found", body = crate::errors::ErrorDetail),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_student_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<StudentView>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.students.find_student_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/students/student/namelike/{name}", tag = "students",
    params(("name" = String, Path, description = "Fragment of the student name", example = "Eri")),
    responses(
        (status = 200, description = "Students whose name contains the fragment", body = [crate::openapi::StudentDoc]),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_student_by_name_containing(
    State(state): State<ServerState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<StudentView>>, JsonApiError> {
    let Path(name) = name?;
    let students = state.students.find_student_by_name_like(&name).await?;
    info!(count = students.len(), "search students by name");
    Ok(Json(students))
}

#[utoipa::path(
    post, path = "/students/Student", tag = "students",
    request_body = crate::openapi::StudentPayloadDoc,
    responses(
        (status = 201, description = "Student added successfully; Location names the new resource"),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 409, description = "A listed course does not exist", body = crate::errors::ErrorDetail),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn add_new_student(
    State(state): State<ServerState>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Created, JsonApiError> {
    let Json(payload) = payload?;
    let created = state.students.save(payload).await?;
    let location = format!("/students/Student/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

#[utoipa::path(
    put, path = "/students/Student/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id", example = 12)),
    request_body = crate::openapi::StudentPayloadDoc,
    responses(
        (status = 200, description = "Changes accepted", body = crate::openapi::StudentDoc),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 404, description = "Student with given id not found", body = crate::errors::ErrorDetail),
        (status = 409, description = "A listed course does not exist", body = crate::errors::ErrorDetail),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn update_student(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<StudentView>, JsonApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.students.update(payload, id).await?))
}

#[utoipa::path(
    delete, path = "/students/Student/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id", example = 12)),
    responses(
        (status = 200, description = "Deleted successfully"),
        (status = 404, description = "Student with given id not found", body = crate::errors::ErrorDetail),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn delete_student_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.students.delete(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post, path = "/students/Student/{id}/courses/{course_id}", tag = "students",
    params(
        ("id" = i32, Path, description = "Student id"),
        ("course_id" = i32, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Student enrolled (idempotent)", body = crate::openapi::StudentDoc),
        (status = 404, description = "Student or course not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn enroll_student(
    State(state): State<ServerState>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<StudentView>, JsonApiError> {
    let Path((id, course_id)) = ids?;
    Ok(Json(state.students.enroll(id, course_id).await?))
}

#[utoipa::path(
    delete, path = "/students/Student/{id}/courses/{course_id}", tag = "students",
    params(
        ("id" = i32, Path, description = "Student id"),
        ("course_id" = i32, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Enrollment removed", body = crate::openapi::StudentDoc),
        (status = 404, description = "Student is not enrolled in the course", body = crate::errors::ErrorDetail)
    )
)]
pub async fn unenroll_student(
    State(state): State<ServerState>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<StudentView>, JsonApiError> {
    let Path((id, course_id)) = ids?;
    Ok(Json(state.students.drop_course(id, course_id).await?))
}
