//! Local Task Repository
//!
//! Keeps the whole list in memory and rewrites the storage slot after every
//! mutation. The slot is read exactly once, on construction.

use std::cell::RefCell;

use async_trait::async_trait;
use uuid::Uuid;

use super::codec;
use super::slot::StorageSlot;
use super::traits::TaskRepository;
use crate::domain::{require_text, DomainError, DomainResult, Task, TaskFields, TaskId, TaskPatch};

pub struct LocalTaskRepository<S: StorageSlot> {
    slot: S,
    tasks: RefCell<Vec<Task>>,
}

impl<S: StorageSlot> LocalTaskRepository<S> {
    /// Load the stored list. An absent or unreadable blob starts empty.
    pub fn load(slot: S) -> Self {
        let tasks = match slot.read() {
            Ok(Some(blob)) => codec::decode(&blob).unwrap_or_else(|e| {
                log::warn!("[LOCAL] Discarding unreadable task list: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("[LOCAL] Storage read failed, starting empty: {}", e);
                Vec::new()
            }
        };
        log::debug!("[LOCAL] Loaded {} tasks", tasks.len());
        Self {
            slot,
            tasks: RefCell::new(tasks),
        }
    }

    /// Run `f` on a copy of the list; commit the copy only if the blob was
    /// written, so memory and storage never diverge.
    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Task>) -> DomainResult<T>) -> DomainResult<T> {
        let mut next = self.tasks.borrow().clone();
        let out = f(&mut next)?;
        self.slot.write(&codec::encode(&next)?)?;
        *self.tasks.borrow_mut() = next;
        Ok(out)
    }
}

#[async_trait(?Send)]
impl<S: StorageSlot> TaskRepository for LocalTaskRepository<S> {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn add(&self, text: &str) -> DomainResult<Task> {
        let task = Task::new(Uuid::new_v4().to_string(), require_text(text)?);
        self.mutate(|tasks| {
            tasks.push(task.clone());
            Ok(())
        })?;
        Ok(task)
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        Ok(self.tasks.borrow().clone())
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> DomainResult<TaskFields> {
        patch.validate()?;
        self.mutate(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| &task.id == id)
                .ok_or_else(|| DomainError::not_found(id))?;
            task.apply(patch);
            Ok(task.fields())
        })
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<()> {
        self.mutate(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| &task.id != id);
            if tasks.len() == before {
                return Err(DomainError::not_found(id));
            }
            Ok(())
        })
    }
}
