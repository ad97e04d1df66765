use axum::http::StatusCode;
use crate::common;

#[tokio::test]
async fn test_delete_todo_success() {
    let app = common::test_app();
    let id = common::create_test_todo(&app, "temporary").await;

    let (status, body) = common::delete(&app, &format!("/api/todos/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = common::get(&app, &format!("/api/todos/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_todo_not_found() {
    let app = common::test_app();
    let (status, response) = common::delete(&app, "/api/todos/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Todo with id 404 not found");
}

#[tokio::test]
async fn test_delete_twice() {
    let app = common::test_app();
    let id = common::create_test_todo(&app, "once").await;
    let uri = format!("/api/todos/{}", id);

    let (first, _) = common::delete(&app, &uri).await;
    let (second, _) = common::delete(&app, &uri).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_zero_and_negative_ids_are_not_found() {
    let app = common::test_app();
    for id in [0, -1] {
        let (status, response) = common::delete(&app, &format!("/api/todos/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(response["message"], format!("Todo with id {} not found", id));
    }
}
