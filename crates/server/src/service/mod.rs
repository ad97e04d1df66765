//! Business rules sitting between the REST handlers and the repository.

pub mod todo;

pub use todo::{TodoService, UpdateMode};
