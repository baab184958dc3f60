use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::{header, StatusCode},
    Json,
};

use service::instructor::InstructorPayload;
use service::views::InstructorView;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/instructors/instructors", tag = "instructors",
    responses(
        (status = 200, description = "All instructors with the courses they teach", body = [crate::openapi::InstructorDoc]),
        (status = 500, description = "Internal Server Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn list_all_instructors(
    State(state): State<ServerState>,
) -> Result<Json<Vec<InstructorView>>, JsonApiError> {
    Ok(Json(state.instructors.list_all().await?))
}

#[utoipa::path(
    get, path = "/instructors/instructor/{id}", tag = "instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    responses(
        (status = 200, description = "Instructor found", body = crate::openapi::InstructorDoc),
        (status = 404, description = "Instructor not found", body = crate::errors::ErrorDetail)
    )
)]
pub async fn get_instructor_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<InstructorView>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.instructors.find_instructor_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/instructors/instructor", tag = "instructors",
    request_body = crate::openapi::InstructorPayloadDoc,
    responses(
        (status = 201, description = "Instructor created; Location names the new resource"),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorDetail)
    )
)]
pub async fn add_new_instructor(
    State(state): State<ServerState>,
    payload: Result<Json<InstructorPayload>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), JsonApiError> {
    let Json(payload) = payload?;
    let created = state.instructors.save(payload).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, format!("/instructors/instructor/{}", created.id))]))
}
