use std::net::SocketAddr;

use configs::AppConfig;
use models::db::{connect_with_config, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, path: &str, body: Value) -> anyhow::Result<String> {
        let res = self.client.post(self.url(path)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED, "POST {path}");
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .ok_or_else(|| anyhow::anyhow!("missing Location"))?
            .to_str()?
            .to_string();
        Ok(location)
    }

    async fn get_json(&self, path: &str) -> anyhow::Result<(HttpStatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json::<Value>().await?))
    }
}

fn id_of(location: &str) -> i64 {
    location.rsplit('/').next().and_then(|s| s.parse().ok()).unwrap_or(-1)
}

/// Fresh in-memory database and server on an ephemeral port per test.
async fn start_server() -> anyhow::Result<TestApp> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    let app = server::startup::build_app(&AppConfig::default(), db).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), client: reqwest::Client::new() })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = app.get_json("/health").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_student_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;

    let location = app.create("/students/Student", json!({"name": "Erin"})).await?;
    assert!(location.starts_with("/students/Student/"));

    let (status, erin) = app.get_json(&location).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(erin["name"], "Erin");
    assert_eq!(erin["courses"], json!([]));

    let (_, found) = app.get_json("/students/student/namelike/Eri").await?;
    assert_eq!(found.as_array().map(Vec::len), Some(1));
    let (_, none) = app.get_json("/students/student/namelike/Zzz").await?;
    assert_eq!(none, json!([]));

    let res = app
        .client
        .put(app.url(&location))
        .json(&json!({"studname": "Erin Li"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["name"], "Erin Li");

    let res = app.client.delete(app.url(&location)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let (status, err) = app.get_json(&location).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(err["status"], 404);
    assert_eq!(err["title"], "Not Found");
    assert!(err["timestamp"].is_i64());

    let res = app.client.delete(app.url(&location)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_student_paging_and_sorting() -> anyhow::Result<()> {
    let app = start_server().await?;
    for name in ["Dana", "Bob", "Erin", "Alice", "Carl"] {
        app.create("/students/Student", json!({"name": name})).await?;
    }

    let (status, first) = app.get_json("/students/students").await?;
    assert_eq!(status, HttpStatusCode::OK);
    let names: Vec<&str> = first.as_array().into_iter().flatten().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, vec!["Dana", "Bob", "Erin"]);

    let (_, second) = app.get_json("/students/students?page=1").await?;
    assert_eq!(second.as_array().map(Vec::len), Some(2));

    let (_, sorted) = app.get_json("/students/students?size=5&sort=name,desc").await?;
    let names: Vec<&str> = sorted.as_array().into_iter().flatten().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, vec!["Erin", "Dana", "Carl", "Bob", "Alice"]);

    let (_, past_end) = app.get_json("/students/students?page=9").await?;
    assert_eq!(past_end, json!([]));

    let (status, _) = app.get_json("/students/students?size=0").await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let (status, _) = app.get_json("/students/students?sort=shoe_size").await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_enrollment_and_course_counts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let sally = id_of(&app.create("/instructors/instructor", json!({"name": "Sally"})).await?);
    let ds = id_of(&app.create("/courses/course", json!({"name": "Data Science", "instructor_id": sally})).await?);
    let js = id_of(&app.create("/courses/course", json!({"name": "JavaScript"})).await?);

    let john = app.create("/students/Student", json!({"name": "John", "course_ids": [ds]})).await?;
    let (_, view) = app.get_json(&john).await?;
    assert_eq!(view["courses"][0]["name"], "Data Science");
    assert_eq!(view["courses"][0]["instructor"]["name"], "Sally");

    let enroll = format!("{}/courses/{}", john, js);
    for _ in 0..2 {
        let res = app.client.post(app.url(&enroll)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }
    let (_, counts) = app.get_json("/courses/studcount").await?;
    assert_eq!(
        counts,
        json!([
            {"id": ds, "name": "Data Science", "student_count": 1},
            {"id": js, "name": "JavaScript", "student_count": 1}
        ])
    );

    let res = app.client.delete(app.url(&enroll)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = app.client.delete(app.url(&enroll)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = app.client.post(app.url(&format!("{}/courses/999", john))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let (_, course) = app.get_json(&format!("/courses/course/{ds}")).await?;
    assert_eq!(course["students"][0]["name"], "John");
    assert!(course["students"][0].get("courses").is_none());

    let (_, sally_view) = app.get_json(&format!("/instructors/instructor/{sally}")).await?;
    assert_eq!(sally_view["courses"][0]["id"], ds);
    Ok(())
}

#[tokio::test]
async fn e2e_rejections_use_error_body() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app
        .client
        .post(app.url("/courses/course"))
        .json(&json!({"name": "Ghost Course", "instructor_id": 999}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let (_, courses) = app.get_json("/courses/courses").await?;
    assert_eq!(courses, json!([]));

    let res = app
        .client
        .post(app.url("/students/Student"))
        .json(&json!({"name": "Kim", "course_ids": [42]}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = app
        .client
        .post(app.url("/students/Student"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 400);

    let res = app.client.post(app.url("/students/Student")).json(&json!({"name": "   "})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = app.client.post(app.url("/students/Student")).json(&json!({"id": 5, "name": "Kim"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = app.client.put(app.url("/students/Student/77")).json(&json!({"name": "Nobody"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let (status, _) = app.get_json("/students/Student/not-a-number").await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_lists_routes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, doc) = app.get_json("/api-docs/openapi.json").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert!(doc["paths"].get("/students/students").is_some());
    assert!(doc["paths"].get("/courses/studcount").is_some());
    Ok(())
}
