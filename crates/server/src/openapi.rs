use axum::Router;
use shared_types::{CreateTodoRequest, ErrorResponse, TodoResponse, UpdateTodoRequest};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::todo::list_todos,
        rest::todo::create_todo,
        rest::todo::get_todo,
        rest::todo::replace_todo,
        rest::todo::patch_todo,
        rest::todo::toggle_todo,
        rest::todo::delete_todo,
        health::health_check,
    ),
    components(schemas(
        TodoResponse,
        CreateTodoRequest,
        UpdateTodoRequest,
        ErrorResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "todos", description = "To-do item management"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Todo API",
        description = "CRUD service for to-do items",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

/// [`api_router`] wrapped in the HTTP middleware stack: request ids
/// (generated when absent, echoed on the response), request tracing and,
/// when `otel` is set, the OpenTelemetry span layer.
pub fn app(state: AppState, otel: bool) -> Router {
    let mut router = api_router(state);

    if otel {
        router = router.layer(crate::telemetry::OtelTraceLayer);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
