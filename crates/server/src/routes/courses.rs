use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::{header, StatusCode},
    Json,
};

use service::course::CoursePayload;
use service::views::{CourseStudentCount, CourseView};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/courses/courses", tag = "courses",
    responses(
        (status = 200, description = "All courses with instructor and students", body = [crate::openapi::CourseDoc]),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn list_all_courses(State(state): State<ServerState>) -> Result<Json<Vec<CourseView>>, JsonApiError> {
    Ok(Json(state.courses.list_all().await?))
}

#[utoipa::path(
    get, path = "/courses/studcount", tag = "courses",
    responses(
        (status = 200, description = "Enrolled student count per course", body = [crate::openapi::CourseStudentCountDoc]),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn student_counts(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CourseStudentCount>>, JsonApiError> {
    Ok(Json(state.courses.student_counts().await?))
}

#[utoipa::path(
    get, path = "/courses/course/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = crate::openapi::CourseDoc),
        (status = 404, description = "Course not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_course_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<CourseView>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.courses.find_course_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/courses/course", tag = "courses",
    request_body = crate::openapi::CoursePayloadDoc,
    responses(
        (status = 201, description = "Course created; Location names the new resource"),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 409, description = "Instructor does not exist", body = crate::errors::ErrorDetail)
    )
)]
pub async fn add_new_course(
    State(state): State<ServerState>,
    payload: Result<Json<CoursePayload>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), JsonApiError> {
    let Json(payload) = payload?;
    let created = state.courses.save(payload).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, format!("/courses/course/{}", created.id))]))
}

#[utoipa::path(
    put, path = "/courses/course/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    request_body = crate::openapi::CoursePayloadDoc,
    responses(
        (status = 200, description = "Changes accepted", body = crate::openapi::CourseDoc),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail),
        (status = 404, description = "Course not found", body = crate::errors::ErrorDetail),
        (status = 409, description = "Instructor does not exist", body = crate::errors::ErrorDetail)
    )
)]
pub async fn update_course(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CoursePayload>, JsonRejection>,
) -> Result<Json<CourseView>, JsonApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.courses.update(payload, id).await?))
}

#[utoipa::path(
    delete, path = "/courses/courses/{id}", tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted; enrollments removed"),
        (status = 404, description = "Course not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn delete_course(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.courses.delete(id).await?;
    Ok(StatusCode::OK)
}
