use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use crate::common;

#[tokio::test]
async fn test_create_todo_success() {
    let app = common::test_app();
    let body = serde_json::json!({
        "title": "Buy groceries",
        "description": "Milk, Eggs",
        "dueDate": "2025-12-31"
    });
    let (status, response) = common::post_json(&app, "/api/todos", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["id"], 1);
    assert_eq!(response["title"], "Buy groceries");
    assert_eq!(response["description"], "Milk, Eggs");
    assert_eq!(response["completed"], false);
    assert_eq!(response["dueDate"], "2025-12-31");
    assert_eq!(response["createdAt"], response["updatedAt"]);
}

#[tokio::test]
async fn test_create_todo_minimal_has_null_optionals() {
    let app = common::test_app();
    let (status, response) =
        common::post_json(&app, "/api/todos", r#"{"title": "Just a title"}"#).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(response["description"].is_null());
    assert!(response["dueDate"].is_null());
}

#[tokio::test]
async fn test_create_todo_trims_title() {
    let app = common::test_app();
    let (status, response) =
        common::post_json(&app, "/api/todos", r#"{"title": "   padded   "}"#).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["title"], "padded");
}

#[tokio::test]
async fn test_create_todo_ignores_completed_in_body() {
    let app = common::test_app();
    let (status, response) =
        common::post_json(&app, "/api/todos", r#"{"title": "t", "completed": true}"#).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["completed"], false);
}

#[tokio::test]
async fn test_create_todo_missing_title() {
    let app = common::test_app();
    let (status, response) = common::post_json(&app, "/api/todos", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["status"], 400);
    assert_eq!(response["message"], "Validation failed");
    assert_eq!(
        response["errors"],
        serde_json::json!(["title: title is required (rejected: null)"])
    );
    assert!(response["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_todo_blank_title() {
    let app = common::test_app();
    let (status, response) = common::post_json(&app, "/api/todos", r#"{"title": "   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["errors"][0],
        "title: title is required (rejected:    )"
    );
}

#[tokio::test]
async fn test_create_todo_reports_every_violation() {
    let app = common::test_app();
    let body = serde_json::json!({
        "title": "x".repeat(256),
        "description": "d".repeat(2001)
    });
    let (status, response) = common::post_json(&app, "/api/todos", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = response["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors[0]
        .as_str()
        .unwrap()
        .starts_with("description: description must be at most 2000 characters"));
    assert!(errors[1]
        .as_str()
        .unwrap()
        .starts_with("title: title must be at most 255 characters"));

    let (_, list) = common::get(&app, "/api/todos").await;
    assert_eq!(list, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_todo_title_at_limit() {
    let app = common::test_app();
    let body = serde_json::json!({ "title": "x".repeat(255) });
    let (status, _) = common::post_json(&app, "/api/todos", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_todo_malformed_json() {
    let app = common::test_app();
    let (status, response) = common::post_json(&app, "/api/todos", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["status"], 400);
    assert!(response["message"]
        .as_str()
        .unwrap()
        .starts_with("Malformed request body"));
    assert!(response.get("errors").is_none());
}

#[tokio::test]
async fn test_create_todo_bad_date() {
    let app = common::test_app();
    let (status, response) =
        common::post_json(&app, "/api/todos", r#"{"title": "t", "dueDate": "31/12/2025"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.get("errors").is_none());
}
