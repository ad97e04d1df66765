use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use crate::common;

#[tokio::test]
async fn test_list_todos_empty() {
    let app = common::test_app();
    let (status, response) = common::get(&app, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_todos_newest_first() {
    let app = common::test_app();
    for title in ["one", "two", "three"] {
        common::create_test_todo(&app, title).await;
    }

    let (status, response) = common::get(&app, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::titles(&response), vec!["three", "two", "one"]);
}

#[tokio::test]
async fn test_list_todos_filter_completed() {
    let app = common::test_app();
    let done = common::create_test_todo(&app, "done").await;
    common::create_test_todo(&app, "open").await;
    common::patch(&app, &format!("/api/todos/{}/complete", done)).await;

    let (status, completed) = common::get(&app, "/api/todos?completed=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::titles(&completed), vec!["done"]);

    let (_, open) = common::get(&app, "/api/todos?completed=false").await;
    assert_eq!(common::titles(&open), vec!["open"]);
}

#[tokio::test]
async fn test_list_todos_search_title_and_description() {
    let app = common::test_app();
    common::create_test_todo(&app, "xxABCxx").await;
    let body = serde_json::json!({ "title": "other", "description": "mentions abc here" });
    common::post_json(&app, "/api/todos", &body.to_string()).await;
    common::create_test_todo(&app, "unrelated").await;

    let (status, response) = common::get(&app, "/api/todos?q=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::titles(&response), vec!["other", "xxABCxx"]);
}

#[tokio::test]
async fn test_list_todos_blank_query_is_ignored() {
    let app = common::test_app();
    common::create_test_todo(&app, "a").await;
    common::create_test_todo(&app, "b").await;

    let (_, all) = common::get(&app, "/api/todos").await;
    let (status, blank) = common::get(&app, "/api/todos?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blank, all);
}

#[tokio::test]
async fn test_list_todos_combined_filters() {
    let app = common::test_app();
    let a = common::create_test_todo(&app, "report draft").await;
    common::create_test_todo(&app, "report final").await;
    common::patch(&app, &format!("/api/todos/{}/complete", a)).await;

    let (_, response) = common::get(&app, "/api/todos?completed=false&q=REPORT").await;
    assert_eq!(common::titles(&response), vec!["report final"]);
}

#[tokio::test]
async fn test_list_todos_invalid_completed_param() {
    let app = common::test_app();
    let (status, response) = common::get(&app, "/api/todos?completed=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"]
        .as_str()
        .unwrap()
        .starts_with("Malformed query string"));
}

#[tokio::test]
async fn test_list_todos_empty_completed_param_is_ignored() {
    let app = common::test_app();
    let done = common::create_test_todo(&app, "done").await;
    common::create_test_todo(&app, "open").await;
    common::patch(&app, &format!("/api/todos/{}/complete", done)).await;

    let (status, response) = common::get(&app, "/api/todos?completed=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::titles(&response), vec!["open", "done"]);
}
