use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use crate::common;

#[tokio::test]
async fn test_health_reports_storage() {
    let app = common::test_app();
    let (status, response) = common::get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["storage"], "memory: connected");
    assert!(response["uptimeSeconds"].is_u64());
    assert!(response["version"].is_string());
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = common::test_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (_, headers, _) = common::send_raw(&app, req).await;

    let id = headers.get("x-request-id").expect("x-request-id header");
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = common::test_app();
    let req = Request::builder()
        .uri("/api/todos")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = common::send_raw(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-request-id").unwrap(), "abc-123");
}

#[tokio::test]
async fn test_docs_are_served() {
    let app = common::test_app();
    let req = Request::builder().uri("/docs").body(Body::empty()).unwrap();
    let (status, _, _) = common::send_raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}
