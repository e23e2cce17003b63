//! Repository Layer - Core Trait
//!
//! Defines the abstract interface for task persistence.
//! Futures are not `Send` because the browser fetch API is single-threaded.

use async_trait::async_trait;

use crate::domain::{DomainResult, Task, TaskFields, TaskId, TaskPatch};

/// CRUD over the task collection
#[async_trait(?Send)]
pub trait TaskRepository {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Persist a new, not yet completed task with already validated text
    async fn add(&self, text: &str) -> DomainResult<Task>;

    /// All tasks in display order
    async fn list(&self) -> DomainResult<Vec<Task>>;

    /// Apply a partial update and report the resulting fields
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> DomainResult<TaskFields>;

    async fn delete(&self, id: &TaskId) -> DomainResult<()>;
}

#[async_trait(?Send)]
impl<R: TaskRepository + ?Sized> TaskRepository for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn add(&self, text: &str) -> DomainResult<Task> {
        (**self).add(text).await
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        (**self).list().await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> DomainResult<TaskFields> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<()> {
        (**self).delete(id).await
    }
}
