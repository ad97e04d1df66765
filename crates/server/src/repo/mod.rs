//! Storage for to-do items.
//!
//! [`TodoRepository`] is the only component allowed to assign ids and stamp
//! `created_at` / `updated_at`. Two backends implement it: PostgreSQL
//! ([`todo::PgTodoRepository`]) and a process-local store
//! ([`memory::InMemoryTodoRepository`]).

pub mod memory;
pub mod todo;

use async_trait::async_trait;
use shared_types::{AppError, Todo, TodoDraft, TodoFilter};

pub use memory::InMemoryTodoRepository;
pub use todo::PgTodoRepository;

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new item. Assigns the id and sets both timestamps to the same
    /// instant.
    async fn insert(&self, draft: TodoDraft) -> Result<Todo, AppError>;

    /// Point lookup by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Overwrite the writable fields of an existing item and refresh
    /// `updated_at`. Returns `None` if the row no longer exists.
    async fn save(&self, id: i64, draft: TodoDraft) -> Result<Option<Todo>, AppError>;

    /// Hard delete. Returns true if a row was actually deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Items matching `filter`, newest first (`created_at DESC, id DESC`).
    async fn find_filtered(&self, filter: &TodoFilter) -> Result<Vec<Todo>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
