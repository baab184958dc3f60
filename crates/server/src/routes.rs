pub mod courses;
pub mod instructors;
pub mod students;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

fn student_routes() -> Router<ServerState> {
    Router::new()
        .route("/students/students", get(students::list_all_students))
        .route("/students/Student", post(students::add_new_student))
        .route(
            "/students/Student/:id",
            get(students::get_student_by_id)
                .put(students::update_student)
                .delete(students::delete_student_by_id),
        )
        .route("/students/student/namelike/:name", get(students::get_student_by_name_containing))
        .route(
            "/students/Student/:id/courses/:course_id",
            post(students::enroll_student).delete(students::unenroll_student),
        )
}

fn course_routes() -> Router<ServerState> {
    Router::new()
        .route("/courses/courses", get(courses::list_all_courses))
        .route("/courses/studcount", get(courses::student_counts))
        .route("/courses/course", post(courses::add_new_course))
        .route("/courses/course/:id", get(courses::get_course_by_id).put(courses::update_course))
        .route("/courses/courses/:id", delete(courses::delete_course))
}

fn instructor_routes() -> Router<ServerState> {
    Router::new()
        .route("/instructors/instructors", get(instructors::list_all_instructors))
        .route("/instructors/instructor", post(instructors::add_new_instructor))
        .route("/instructors/instructor/:id", get(instructors::get_instructor_by_id))
}

/// Build the full application router: health, the three resource groups and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(student_routes())
        .merge(course_routes())
        .merge(instructor_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use models::db::{connect_with_config, DatabaseConfig};

    async fn app() -> anyhow::Result<Router> {
        let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
        Ok(crate::startup::build_app(&configs::AppConfig::default(), db).await?)
    }

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let res = app().await?.oneshot(Request::get("/health").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn create_sets_location_with_empty_body() -> anyhow::Result<()> {
        let req = Request::post("/instructors/instructor")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"instructname":"Sally"}"#))?;
        let res = app().await?.oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/instructors/instructor/1")
        );
        assert!(to_bytes(res.into_body(), usize::MAX).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_course_is_json_404() -> anyhow::Result<()> {
        let res = app().await?.oneshot(Request::get("/courses/course/41").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert_eq!(body["detail"], "course 41 not found");
        Ok(())
    }
}
