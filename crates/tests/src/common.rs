use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server::db::AppState;
use tower::ServiceExt;

/// Build the full application router over a fresh in-memory store.
/// Every call gets its own store, so tests never see each other's data.
pub fn test_app() -> Router {
    server::openapi::app(AppState::in_memory(), false)
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, json_request("POST", uri, body)).await
}

/// PUT JSON to a route.
pub async fn put_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// PATCH JSON to a route.
pub async fn patch_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, json_request("PATCH", uri, body)).await
}

/// PATCH a route with no body.
pub async fn patch(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, empty_request("PATCH", uri)).await
}

/// GET a route.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, empty_request("GET", uri)).await
}

/// DELETE a route.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, empty_request("DELETE", uri)).await
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and return status + parsed JSON body (`Null` when empty).
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, req).await;
    (status, body)
}

/// Send a request and return status, headers and parsed JSON body.
pub async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, headers, body)
}

/// Create a to-do through the API and return its id.
pub async fn create_test_todo(app: &Router, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title });
    let (status, response) = post_json(app, "/api/todos", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {response}");
    response["id"].as_i64().expect("created todo has a numeric id")
}

/// Titles of a list response, in order.
pub fn titles(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|t| t["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
