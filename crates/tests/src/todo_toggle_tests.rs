use axum::http::StatusCode;
use crate::common;

#[tokio::test]
async fn test_toggle_flips_and_restores() {
    let app = common::test_app();
    let id = common::create_test_todo(&app, "flip me").await;
    let uri = format!("/api/todos/{}/complete", id);

    let (status, first) = common::patch(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["completed"], true);

    let (status, second) = common::patch(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["completed"], false);
    assert_eq!(second["title"], "flip me");
}

#[tokio::test]
async fn test_toggle_not_found() {
    let app = common::test_app();
    let (status, response) = common::patch(&app, "/api/todos/12/complete").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Todo with id 12 not found");
}
