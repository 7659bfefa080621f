//! Task store abstraction.
//!
//! Defines the [`TaskStore`] trait over the ordered task collection.
//! Backends:
//! - [`memory::MemoryStore`] — authoritative in-process store (local
//!   sessions and the task service)
//! - `RemoteStore` in the client — HTTP-backed cache of the service state
//!
//! All methods take `&self`; backends synchronize internally so a store
//! can be shared across spawned operations behind an `Arc`.

pub mod memory;

use crate::task::{Task, TaskId};

/// Errors produced by task store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The title was empty after trimming.
    #[error("task title cannot be empty")]
    TitleEmpty,

    /// The title exceeds the maximum length.
    #[error("task title too long (max {} characters)", crate::task::MAX_TASK_TITLE_LENGTH)]
    TitleTooLong,

    /// No task with the given id exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The remote service rejected the request with a structured error.
    #[error("server error: {0}")]
    Server(String),

    /// The remote service could not be reached.
    #[error("network error: {0}")]
    Network(String),
}

/// Ordered collection of tasks with add/complete/rename/remove/list ops.
pub trait TaskStore: Send + Sync {
    /// Appends a new task with the given title and `completed = false`.
    ///
    /// The title is trimmed before validation and storage.
    fn add(&self, title: &str) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Sets the `completed` flag of an existing task.
    fn set_completed(
        &self,
        id: TaskId,
        completed: bool,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Replaces the title of an existing task.
    fn rename(
        &self,
        id: TaskId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Removes an existing task.
    fn remove(&self, id: TaskId) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Returns all tasks in insertion order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;
}

/// Validates a raw title, returning the trimmed form.
///
/// # Errors
///
/// Returns [`StoreError::TitleEmpty`] if nothing remains after trimming,
/// or [`StoreError::TitleTooLong`] beyond [`MAX_TASK_TITLE_LENGTH`]
/// characters.
///
/// [`MAX_TASK_TITLE_LENGTH`]: crate::task::MAX_TASK_TITLE_LENGTH
pub fn validate_title(title: &str) -> Result<&str, StoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::TitleEmpty);
    }
    if trimmed.chars().count() > crate::task::MAX_TASK_TITLE_LENGTH {
        return Err(StoreError::TitleTooLong);
    }
    Ok(trimmed)
}
