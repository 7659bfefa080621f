//! In-memory task store.
//!
//! The authoritative backend for local sessions and the task service.
//! Ids come from a monotonically increasing counter starting at 1 and are
//! never reused, so identifiers held by callers stay stable across
//! deletions. All state is lost when the process exits.

use parking_lot::Mutex;

use super::{StoreError, TaskStore, validate_title};
use crate::task::{Task, TaskId};

/// Interior state guarded by one mutex: the ordered task list plus the
/// id counter.
#[derive(Debug)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
}

/// Thread-safe in-memory [`TaskStore`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates a new, empty store. The first task gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the number of tasks currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Returns `true` if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryStore {
    async fn add(&self, title: &str) -> Result<Task, StoreError> {
        let trimmed = validate_title(title)?;
        let mut inner = self.inner.lock();
        let task = Task {
            id: TaskId::new(inner.next_id),
            title: trimmed.to_string(),
            completed: false,
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, StoreError> {
        let mut inner = self.inner.lock();
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.completed = completed;
        Ok(task.clone())
    }

    async fn rename(&self, id: TaskId, title: &str) -> Result<Task, StoreError> {
        let trimmed = validate_title(title)?;
        let mut inner = self.inner.lock();
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.title = trimmed.to_string();
        Ok(task.clone())
    }

    async fn remove(&self, id: TaskId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let index = inner
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        inner.tasks.remove(index);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.inner.lock().tasks.clone())
    }
}
