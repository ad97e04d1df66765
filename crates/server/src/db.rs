use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::{Settings, StorageMode};
use crate::repo::{InMemoryTodoRepository, PgTodoRepository, TodoRepository};
use crate::service::TodoService;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<TodoService>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub todos: TodoService,
    pub repo: Arc<dyn TodoRepository>,
    pub storage: StorageMode,
}

impl AppState {
    pub fn new(repo: Arc<dyn TodoRepository>, storage: StorageMode) -> Self {
        Self {
            todos: TodoService::new(repo.clone()),
            repo,
            storage,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTodoRepository::new()), StorageMode::Memory)
    }
}

/// Create the connection pool. Uses `connect_lazy` so no connections open
/// until the first query.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<Pool<Postgres>, AppError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)
        .map_err(|e| AppError::database(format!("Failed to create database pool: {e}")))
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to run database migrations: {e}")))
}

/// Build the repository selected by `settings`, migrating Postgres first.
pub async fn build_repository(settings: &Settings) -> Result<Arc<dyn TodoRepository>, AppError> {
    match settings.storage_mode {
        StorageMode::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Ok(Arc::new(InMemoryTodoRepository::new()))
        }
        StorageMode::Postgres => {
            let url = settings
                .database_url
                .as_deref()
                .ok_or_else(|| AppError::internal("DATABASE_URL is not configured"))?;
            let pool = create_pool(url, settings.max_connections)?;
            run_migrations(&pool).await?;
            tracing::info!(max_connections = settings.max_connections, "database ready");
            Ok(Arc::new(PgTodoRepository::new(pool)))
        }
    }
}
