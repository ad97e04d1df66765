use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::AppError;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 255;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

const TITLE_REQUIRED: &str = "title is required";
const TITLE_BLANK: &str = "title must not be blank";
const TITLE_TOO_LONG: &str = "title must be at most 255 characters";
const DESCRIPTION_TOO_LONG: &str = "description must be at most 2000 characters";

// ---------------------------------------------------------------------------
// Domain Structs
// ---------------------------------------------------------------------------

/// A persisted to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of a to-do. Storage turns a draft into a [`Todo`] by
/// assigning the id and stamping timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

impl TodoDraft {
    /// Draft for a brand-new item; always starts incomplete.
    pub fn new(title: impl Into<String>, description: Option<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            description,
            completed: false,
            due_date,
        }
    }

    /// Trim the title and enforce the field invariants every write must hold.
    pub fn normalized(self) -> Result<Self, AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::invalid(TITLE_BLANK));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(AppError::invalid(TITLE_TOO_LONG));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                return Err(AppError::invalid(DESCRIPTION_TOO_LONG));
            }
        }
        Ok(Self { title, ..self })
    }
}

impl From<&Todo> for TodoDraft {
    fn from(t: &Todo) -> Self {
        Self {
            title: t.title.clone(),
            description: t.description.clone(),
            completed: t.completed,
            due_date: t.due_date,
        }
    }
}

/// Normalized list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    /// Case-insensitive substring matched against title or description.
    pub query: Option<String>,
}

impl TodoFilter {
    /// Builds a filter, trimming the text query and dropping it when empty.
    pub fn new(completed: Option<bool>, query: Option<&str>) -> Self {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        Self { completed, query }
    }

    /// In-process evaluation of the filter, matching what the SQL query does.
    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(completed) = self.completed {
            if todo.completed != completed {
                return false;
            }
        }
        match &self.query {
            None => true,
            Some(q) => {
                let needle = q.to_lowercase();
                todo.title.to_lowercase().contains(&needle)
                    || todo
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            due_date: t.due_date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Request body for creating a new to-do item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Buy groceries"))]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "2025-12-31"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Request body shared by PUT (full replace) and PATCH (partial update).
///
/// The outer `Option` records whether the field was sent at all; the inner
/// one whether it was sent as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "2025-12-31"))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Marks a field that appeared in the payload, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Shape validation
// ---------------------------------------------------------------------------

#[cfg(feature = "validation")]
mod rules {
    use std::borrow::Cow;

    use serde::Serialize;
    use validator::{Validate, ValidationError, ValidationErrors};

    use super::*;

    fn rejected<T: Serialize>(code: &'static str, message: &'static str, value: &T) -> ValidationError {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(message));
        err.add_param(Cow::Borrowed("value"), value);
        err
    }

    fn check_title_length(errors: &mut ValidationErrors, title: &str) {
        if title.chars().count() > TITLE_MAX_CHARS {
            errors.add("title", rejected("length", TITLE_TOO_LONG, &title));
        }
    }

    fn check_description_length(errors: &mut ValidationErrors, description: &str) {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.add("description", rejected("length", DESCRIPTION_TOO_LONG, &description));
        }
    }

    impl Validate for CreateTodoRequest {
        fn validate(&self) -> Result<(), ValidationErrors> {
            let mut errors = ValidationErrors::new();
            match self.title.as_deref() {
                None => errors.add("title", rejected("required", TITLE_REQUIRED, &self.title)),
                Some(title) => {
                    if title.trim().is_empty() {
                        errors.add("title", rejected("blank", TITLE_REQUIRED, &title));
                    }
                    check_title_length(&mut errors, title);
                }
            }
            if let Some(description) = self.description.as_deref() {
                check_description_length(&mut errors, description);
            }
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors)
            }
        }
    }

    impl Validate for UpdateTodoRequest {
        fn validate(&self) -> Result<(), ValidationErrors> {
            let mut errors = ValidationErrors::new();
            if let Some(Some(title)) = self.title.as_ref() {
                check_title_length(&mut errors, title);
            }
            if let Some(Some(description)) = self.description.as_ref() {
                check_description_length(&mut errors, description);
            }
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors)
            }
        }
    }
}
