use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use shared_types::{AppError, Todo, TodoDraft, TodoFilter};
use tokio::sync::RwLock;

use super::TodoRepository;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Todo>,
}

/// Process-local repository. Used for `STORAGE_MODE=memory` and by the
/// integration tests; state is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    store: RwLock<Store>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn insert(&self, draft: TodoDraft) -> Result<Todo, AppError> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: store.next_id,
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.read().await.rows.contains_key(&id))
    }

    async fn save(&self, id: i64, draft: TodoDraft) -> Result<Option<Todo>, AppError> {
        let mut store = self.store.write().await;
        let Some(row) = store.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.title = draft.title;
        row.description = draft.description;
        row.completed = draft.completed;
        row.due_date = draft.due_date;
        // Wall clock may step backwards; never let updated_at precede created_at.
        row.updated_at = Utc::now().max(row.created_at);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.write().await.rows.remove(&id).is_some())
    }

    async fn find_filtered(&self, filter: &TodoFilter) -> Result<Vec<Todo>, AppError> {
        let store = self.store.read().await;
        let mut rows: Vec<Todo> = store
            .rows
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.read().await.rows.len() as i64)
    }
}
