use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use taskdeck_server::task::{TaskState, api::create_tasks_router};
use taskdeck_server::web::health_check_handler;
use tower::ServiceExt;

mod common;

async fn setup_app() -> Router {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let db = common::setup_db().await.expect("Failed to setup database");
    let task_state = TaskState { db: Arc::new(db) };
    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(create_tasks_router(task_state))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_task(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/tasks", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = setup_app().await;

    let response = app
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn listing_tasks_on_empty_store_returns_empty_groups() {
    let app = setup_app().await;

    let response = app
        .oneshot(empty_request(Method::GET, "/api/tasks"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "today": [], "tomorrow": [], "week": [] })
    );
}

#[tokio::test]
async fn can_create_task_and_fetch_it_by_id() {
    let app = setup_app().await;

    let created = create_task(&app, json!({ "title": "Buy milk" })).await;
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert_eq!(created["bucket"], "today");
    assert_eq!(created["list"], Value::Null);

    let id = created["id"].as_i64().unwrap();
    let response = app
        .oneshot(empty_request(Method::GET, &format!("/api/tasks/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Buy milk");
}

#[tokio::test]
async fn cannot_create_task_without_title() {
    let app = setup_app().await;

    for body in [json!({}), json!({ "title": "" }), json!({ "title": "   " })] {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/tasks", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Title is required" })
        );
    }
}

#[tokio::test]
async fn cannot_create_task_with_unknown_bucket() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/tasks",
            json!({ "title": "x", "bucket": "someday" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Invalid bucket" })
    );
}

#[tokio::test]
async fn malformed_id_is_rejected_before_store_access() {
    let app = setup_app().await;

    for (method, uri) in [
        (Method::GET, "/api/tasks/not-an-id"),
        (Method::DELETE, "/api/tasks/not-an-id"),
    ] {
        let response = app.clone().oneshot(empty_request(method, uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "message": "Invalid id" }));
    }

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/tasks/not-an-id",
            json!({ "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "message": "Invalid id" }));
}

#[tokio::test]
async fn missing_task_yields_not_found_body() {
    let app = setup_app().await;

    let response = app
        .oneshot(empty_request(Method::GET, "/api/tasks/12345"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "message": "Not found" }));
}

#[tokio::test]
async fn created_tasks_appear_in_their_bucket_group() {
    let app = setup_app().await;
    create_task(&app, json!({ "title": "a" })).await;
    create_task(&app, json!({ "title": "b", "bucket": "tomorrow" })).await;
    create_task(&app, json!({ "title": "c", "bucket": "week" })).await;

    let response = app
        .oneshot(empty_request(Method::GET, "/api/tasks"))
        .await
        .unwrap();
    let grouped = body_json(response).await;

    assert_eq!(grouped["today"].as_array().unwrap().len(), 1);
    assert_eq!(grouped["tomorrow"][0]["title"], "b");
    assert_eq!(grouped["week"][0]["title"], "c");
}

#[tokio::test]
async fn toggling_completed_twice_restores_original_value() {
    let app = setup_app().await;
    let created = create_task(&app, json!({ "title": "flip me" })).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/tasks/{id}");

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &uri,
            json!({ "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["completed"], true);

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &uri,
            json!({ "completed": false }),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["completed"], false);
}

#[tokio::test]
async fn updating_with_unparsable_date_leaves_field_absent() {
    let app = setup_app().await;
    let created = create_task(
        &app,
        json!({ "title": "dated", "startDate": "2025-03-01T09:00:00Z" }),
    )
    .await;
    assert!(created["startDate"].is_string());
    let id = created["id"].as_i64().unwrap();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/tasks/{id}"),
            json!({ "startDate": "whenever" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["startDate"], Value::Null);
}

#[tokio::test]
async fn deleting_a_task_returns_no_content_and_removes_it() {
    let app = setup_app().await;
    let created = create_task(&app, json!({ "title": "doomed" })).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/tasks/{id}");

    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/tasks"))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "today": [], "tomorrow": [], "week": [] })
    );

    let response = app.oneshot(empty_request(Method::DELETE, &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
