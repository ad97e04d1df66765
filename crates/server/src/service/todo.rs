use std::sync::Arc;

use shared_types::{AppError, CreateTodoRequest, Todo, TodoDraft, TodoFilter, UpdateTodoRequest};

use crate::repo::TodoRepository;

/// How an update request is applied to the stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT: title required; title, description and due date are overwritten,
    /// `completed` only when sent.
    Replace,
    /// PATCH: only fields present in the payload are applied.
    Merge,
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("Todo with id {} not found", id))
}

/// To-do operations. Cheap to clone; all state lives in the repository.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: CreateTodoRequest) -> Result<Todo, AppError> {
        let title = input
            .title
            .ok_or_else(|| AppError::invalid("title is required"))?;
        let draft = TodoDraft::new(title, input.description, input.due_date).normalized()?;

        let todo = self.repo.insert(draft).await?;
        tracing::info!(id = todo.id, "todo created");
        Ok(todo)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, completed: Option<bool>, query: Option<&str>) -> Result<Vec<Todo>, AppError> {
        let filter = TodoFilter::new(completed, query);
        let todos = self.repo.find_filtered(&filter).await?;
        tracing::debug!(count = todos.len(), "todos listed");
        Ok(todos)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Todo, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateTodoRequest, mode: UpdateMode) -> Result<Todo, AppError> {
        let existing = self.get_by_id(id).await?;

        let draft = match mode {
            UpdateMode::Replace => replace_draft(&existing, input)?,
            UpdateMode::Merge => merge_draft(&existing, input)?,
        };

        self.persist(id, draft.normalized()?).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_complete(&self, id: i64) -> Result<Todo, AppError> {
        let existing = self.get_by_id(id).await?;
        let mut draft = TodoDraft::from(&existing);
        draft.completed = !existing.completed;
        self.persist(id, draft).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.exists(id).await? {
            return Err(not_found(id));
        }
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "todo deleted");
        Ok(())
    }

    async fn persist(&self, id: i64, draft: TodoDraft) -> Result<Todo, AppError> {
        let todo = self.repo.save(id, draft).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(id, completed = todo.completed, "todo updated");
        Ok(todo)
    }
}

fn replace_draft(existing: &Todo, input: UpdateTodoRequest) -> Result<TodoDraft, AppError> {
    let title = input
        .title
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::invalid("title is required for PUT"))?;

    Ok(TodoDraft {
        title,
        description: input.description.flatten(),
        completed: input.completed.unwrap_or(existing.completed),
        due_date: input.due_date.flatten(),
    })
}

fn merge_draft(existing: &Todo, input: UpdateTodoRequest) -> Result<TodoDraft, AppError> {
    let mut draft = TodoDraft::from(existing);

    match input.title {
        Some(Some(title)) => draft.title = title,
        Some(None) => return Err(AppError::invalid("title cannot be null")),
        None => {}
    }
    if let Some(description) = input.description {
        draft.description = description;
    }
    if let Some(completed) = input.completed {
        draft.completed = completed;
    }
    if let Some(due_date) = input.due_date {
        draft.due_date = due_date;
    }

    Ok(draft)
}
