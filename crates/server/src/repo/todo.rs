use async_trait::async_trait;
use shared_types::{AppError, Todo, TodoDraft, TodoFilter};
use sqlx::{Pool, Postgres};

use super::TodoRepository;
use crate::error_convert::SqlxErrorExt;

/// PostgreSQL-backed repository. Timestamps come from the database clock.
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: Pool<Postgres>,
}

impl PgTodoRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn insert(&self, draft: TodoDraft) -> Result<Todo, AppError> {
        // NOW() is the transaction start time, so both columns get the same value.
        let row = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, completed, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, title, description, completed, due_date, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.completed)
        .bind(draft.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, due_date, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        Ok(row)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todos WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        Ok(exists)
    }

    async fn save(&self, id: i64, draft: TodoDraft) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title       = $2,
                description = $3,
                completed   = $4,
                due_date    = $5,
                updated_at  = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING id, title, description, completed, due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.completed)
        .bind(draft.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_filtered(&self, filter: &TodoFilter) -> Result<Vec<Todo>, AppError> {
        // strpos instead of LIKE so `%` and `_` in the query match literally.
        let rows = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, due_date, created_at, updated_at
            FROM todos
            WHERE ($1::BOOLEAN IS NULL OR completed = $1)
              AND ($2::TEXT IS NULL
                   OR strpos(lower(title), lower($2)) > 0
                   OR strpos(lower(COALESCE(description, '')), lower($2)) > 0)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(filter.completed)
        .bind(filter.query.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        Ok(rows)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        Ok(count)
    }
}
