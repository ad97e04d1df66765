use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use crate::common;

#[tokio::test]
async fn test_get_todo_success() {
    let app = common::test_app();
    let id = common::create_test_todo(&app, "Write docs").await;

    let (status, response) = common::get(&app, &format!("/api/todos/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["id"], id);
    assert_eq!(response["title"], "Write docs");
}

#[tokio::test]
async fn test_get_todo_not_found() {
    let app = common::test_app();
    let (status, response) = common::get(&app, "/api/todos/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["status"], 404);
    assert_eq!(response["message"], "Todo with id 999 not found");
    assert!(response.get("errors").is_none());
}

#[tokio::test]
async fn test_get_todo_invalid_id() {
    let app = common::test_app();
    for uri in ["/api/todos/abc", "/api/todos/1.5"] {
        let (status, response) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response["status"], 400);
    }
}

#[tokio::test]
async fn test_get_todo_zero_and_negative_ids_are_not_found() {
    let app = common::test_app();
    common::create_test_todo(&app, "exists").await;

    for id in [0, -1] {
        let (status, response) = common::get(&app, &format!("/api/todos/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(response["message"], format!("Todo with id {} not found", id));
    }
}
