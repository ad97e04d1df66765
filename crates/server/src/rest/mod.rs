pub mod todo;

use axum::{routing::{get, patch}, Router};
use crate::db::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/todos", get(todo::list_todos).post(todo::create_todo))
        .route(
            "/api/todos/{id}",
            get(todo::get_todo)
                .put(todo::replace_todo)
                .patch(todo::patch_todo)
                .delete(todo::delete_todo),
        )
        .route("/api/todos/{id}/complete", patch(todo::toggle_todo))
}
