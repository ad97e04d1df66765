use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer};

use shared_types::{AppError, CreateTodoRequest, ErrorResponse, TodoResponse, UpdateTodoRequest};

use crate::error_convert::{parse_id, RejectionExt, ValidateRequest};
use crate::service::{TodoService, UpdateMode};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoListParams {
    /// Restrict to completed (`true`) or open (`false`) items. An empty
    /// value means no restriction.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub completed: Option<bool>,
    /// Case-insensitive text matched against title or description.
    pub q: Option<String>,
}

/// `completed=` with no value is the same as leaving the parameter out.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<bool>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// GET /api/todos
// ---------------------------------------------------------------------------

/// List to-do items, newest first.
#[utoipa::path(
    get,
    path = "/api/todos",
    params(TodoListParams),
    responses(
        (status = 200, description = "To-do list", body = Vec<TodoResponse>),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos, params))]
pub async fn list_todos(
    State(todos): State<TodoService>,
    params: Result<Query<TodoListParams>, QueryRejection>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let Query(params) = params.map_err(RejectionExt::into_app_error)?;
    let items = todos.list(params.completed, params.q.as_deref()).await?;
    Ok(Json(items.into_iter().map(TodoResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// POST /api/todos
// ---------------------------------------------------------------------------

/// Create a new to-do item.
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "To-do created", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos, body))]
pub async fn create_todo(
    State(todos): State<TodoService>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let Json(body) = body.map_err(RejectionExt::into_app_error)?;
    body.validate_request()?;

    let todo = todos.create(body).await?;
    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

// ---------------------------------------------------------------------------
// GET /api/todos/{id}
// ---------------------------------------------------------------------------

/// Get a single to-do item by ID.
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "To-do found", body = TodoResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos))]
pub async fn get_todo(
    State(todos): State<TodoService>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_id(&id)?;
    let todo = todos.get_by_id(id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

// ---------------------------------------------------------------------------
// PUT /api/todos/{id}
// ---------------------------------------------------------------------------

/// Replace a to-do item. `title` is required; `completed` is kept unless sent.
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = i64, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "To-do replaced", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos, body))]
pub async fn replace_todo(
    State(todos): State<TodoService>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    update(todos, id, body, UpdateMode::Replace).await
}

// ---------------------------------------------------------------------------
// PATCH /api/todos/{id}
// ---------------------------------------------------------------------------

/// Partially update a to-do item. Only fields present in the body change.
#[utoipa::path(
    patch,
    path = "/api/todos/{id}",
    params(("id" = i64, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "To-do updated", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos, body))]
pub async fn patch_todo(
    State(todos): State<TodoService>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    update(todos, id, body, UpdateMode::Merge).await
}

async fn update(
    todos: TodoService,
    raw_id: String,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
    mode: UpdateMode,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let Json(body) = body.map_err(RejectionExt::into_app_error)?;
    body.validate_request()?;

    let todo = todos.update(id, body, mode).await?;
    Ok(Json(TodoResponse::from(todo)))
}

// ---------------------------------------------------------------------------
// PATCH /api/todos/{id}/complete
// ---------------------------------------------------------------------------

/// Flip the completion flag.
#[utoipa::path(
    patch,
    path = "/api/todos/{id}/complete",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Completion toggled", body = TodoResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos))]
pub async fn toggle_todo(
    State(todos): State<TodoService>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_id(&id)?;
    let todo = todos.toggle_complete(id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

// ---------------------------------------------------------------------------
// DELETE /api/todos/{id}
// ---------------------------------------------------------------------------

/// Delete a to-do item.
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 204, description = "To-do deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "todos"
)]
#[tracing::instrument(skip(todos))]
pub async fn delete_todo(
    State(todos): State<TodoService>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
